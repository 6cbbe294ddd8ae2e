//! Frontends for the brightness pipeline: command line handling, trace
//! plotting and the minifb viewer.

pub mod cli;
pub mod plot;
pub mod viewer;

pub use cli::Args;
pub use plot::{Canvas, Layout};
pub use viewer::ViewerRenderer;

use base::CancelToken;

/// Raise `token` on Ctrl-C. The pipeline notices at the next frame boundary.
pub fn cancel_on_ctrl_c(token: CancelToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::info!("interrupted, stopping after the current frame");
                token.cancel();
            }
            Err(error) => log::error!("cannot listen for Ctrl-C: {}", error),
        }
    });
}
