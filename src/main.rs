use std::process::ExitCode;

fn main() -> ExitCode {
    pretty_env_logger::init();
    let status = create_fastapi_app::run_with_args(std::env::args_os());
    ExitCode::from(status.code())
}
