fn main() -> std::process::ExitCode {
    doer::run()
}
