use {
    brightness::{LogRenderer, Pipeline},
    brightness_view::{Args, cancel_on_ctrl_c},
    clap::Parser,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.init_logging()?;

    let mut pipeline = Pipeline::new(
        args.to_config()?.with_compute_display(false),
        args.open_device(),
        LogRenderer,
    )?;
    cancel_on_ctrl_c(pipeline.cancel_token());

    // the pipeline logs its run summary when it stops
    pipeline.run().await?;
    Ok(())
}
