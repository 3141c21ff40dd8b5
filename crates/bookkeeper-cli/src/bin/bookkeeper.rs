// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The bookkeeper computes how a delegate's epoch rewards are shared among its voters.

const CLI_LONG_ABOUT: &str = r#"
The bookkeeper computes how a delegate's epoch rewards are shared among its voters.

`export` walks a range of epochs and writes the per-voter distribution as a CSV or as
batch-transfer call data. `convert` turns an existing `address,amount` CSV into call data.
`dump` prints every vote of an election result.
"#;

use anyhow::Result;
use bookkeeper_cli::{commands::BookkeeperCommands, config::GlobalConfig};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Delegate reward bookkeeping",
    long_about = CLI_LONG_ABOUT,
    arg_required_else_help = true
)]
struct MainArgs {
    /// Subcommand to run
    #[command(subcommand)]
    command: BookkeeperCommands,

    #[command(flatten, next_help_heading = "Global Options")]
    config: GlobalConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = MainArgs::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(args.config.log_level.into())
                .from_env_lossy(),
        )
        .init();

    args.command.run(&args.config).await
}
