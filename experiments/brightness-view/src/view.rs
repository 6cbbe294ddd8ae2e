use {
    brightness::Pipeline,
    brightness_view::{Args, Layout, ViewerRenderer, cancel_on_ctrl_c},
    clap::Parser,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.init_logging()?;

    let config = args.to_config()?;
    log::info!("Brightness View");
    log::info!("Controls: ESC to exit");

    let renderer = ViewerRenderer::new(Layout::default())?;
    let mut pipeline = Pipeline::new(config, args.open_device(), renderer)?;
    cancel_on_ctrl_c(pipeline.cancel_token());

    // the pipeline logs its run summary when it stops
    pipeline.run().await?;
    Ok(())
}
