use std::process::ExitCode;

pub mod config;
pub mod crawler;
pub mod dashboard;
pub mod declare;
pub mod event;
pub mod logging;
pub mod util;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    match event::refresh::execute().await {
        Ok(summary) => {
            if summary.success == 0 {
                // Nothing was fetched; let the scheduler see a failed run.
                logging::error_console("No data fetched, skipping dashboard update".to_string());
                return ExitCode::FAILURE;
            }

            ExitCode::SUCCESS
        }
        Err(why) => {
            logging::error_file_async(format!("Failed to refresh dashboard because {:?}", why));
            logging::error_console(format!("Failed to refresh dashboard because {:?}", why));
            ExitCode::FAILURE
        }
    }
}
