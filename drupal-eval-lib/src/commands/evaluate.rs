use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::pipeline::EvaluationOptions;
use crate::reports::Layout;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// Machine name of the project (e.g. `ctools`)
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Branch to evaluate (e.g. `8.x-3.x-dev`)
    #[arg(value_name = "BRANCH")]
    pub branch: String,

    /// Scan the recommended release rather than the development branch
    #[arg(long)]
    pub scan_stable: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn evaluate_project<H: Host>(host: &mut H, args: &EvaluateArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common).await?;
    let options = EvaluationOptions {
        scan_stable: args.scan_stable,
    };

    let result = common.evaluator.evaluate_one(&args.name, &args.branch, options).await;
    common.progress().done();

    common.report(&[result?], Layout::PropertyList)
}
