//! gog - scriptable Google Workspace CLI.

use gogcli::engine::exit::ExitCode;
use gogcli::ui;

#[tokio::main]
async fn main() {
    let code = match gogcli::cli::run().await {
        Ok(code) => code,
        Err(err) => {
            ui::output::error(format!("{:#}", err));
            ExitCode::for_error(&err)
        }
    };
    std::process::exit(code.as_i32());
}
