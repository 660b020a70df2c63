//! wt-scaffold - download webtask templates and deploy them with `wt`

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use scaffold_core::config::parse_assignments;
use scaffold_core::{DeployTool, Outcome, Pipeline, ScaffoldRequest, Workspace};

#[derive(Parser, Debug)]
#[command(name = "wt-scaffold")]
#[command(about = "download webtask templates")]
#[command(version)]
struct Args {
    /// Webtask to scaffold: a sample name, an org/repo/path shorthand, or a
    /// path inside --repo. Omit to list the available samples.
    webtask: Option<String>,

    /// Name for the materialized webtask (defaults to the file's basename)
    name: Option<String>,

    /// Name of the webtask profile to use
    #[arg(short, long, default_value = "default")]
    profile: String,

    /// Nonsecret param(s) to provide to code at runtime (key=value)
    #[arg(short = 'm', long = "param")]
    params: Vec<String>,

    /// Secret(s) to provide to code at runtime (key=value)
    #[arg(short, long = "secret")]
    secrets: Vec<String>,

    /// Git repo to use
    #[arg(short, long)]
    repo: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // An interrupt mid-clone would leave the workspace behind; drop it
    // before exiting so the next run starts clean.
    ctrlc::set_handler(move || {
        let mut workspace = Workspace::default_location();
        let _ = workspace.release();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let request = ScaffoldRequest {
        identifier: args.webtask,
        name: args.name,
        repo: args.repo,
        profile: args.profile,
        params: parse_assignments(&args.params)?,
        secrets: parse_assignments(&args.secrets)?,
    };

    let pipeline = Pipeline::new(DeployTool::sibling()?);
    match pipeline.run(&request).await {
        Ok(Outcome::Listed(scaffolds)) => {
            println!("{}", "Available webtasks:".green().bold());
            for scaffold in &scaffolds {
                println!(
                    "{}: {}",
                    scaffold.name.bold().white(),
                    scaffold.description.dimmed()
                );
            }
        }
        Ok(Outcome::Deployed { filename, url }) => {
            println!("{} {}", "Scaffold written to".blue(), filename.bold().green());
            println!("{} {}", "Scaffold deployed to".blue(), url.bold().green());
        }
        Err(err) => {
            let err = anyhow::Error::new(err);
            eprintln!("{}", format!("{err:#}").red());
            std::process::exit(1);
        }
    }

    Ok(())
}
