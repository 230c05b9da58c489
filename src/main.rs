use std::process::ExitCode;

fn main() -> ExitCode {
    hook_dispatch::run_hook()
}
