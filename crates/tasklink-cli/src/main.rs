use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tasklink_core::domain::{MessageDraft, RelationKind, TaskId, UserId};
use tasklink_core::impls::FactSeed;
use tasklink_core::{App, AppBuilder, AppConfig};
use tracing_subscriber::EnvFilter;

/// facts fixture に対してメッセージ権限を確認する CLI
#[derive(Debug, Parser)]
#[command(name = "tasklink", version, about)]
struct Cli {
    /// bid / offer / agreement を含む JSON fixture（TASKLINK_FIXTURE より優先）
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// tracing の EnvFilter（TASKLINK_LOG より優先。例: "debug,tasklink_core=trace"）
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// sender が receiver にメッセージを送れるか
    Check {
        #[arg(long)]
        from: i64,
        #[arg(long)]
        to: i64,
    },
    /// user がメッセージを送れる相手の一覧
    Recipients {
        #[arg(long)]
        user: i64,
    },
    /// 権限を確認してからメッセージを送る（結果はメモリ上にだけ残る）
    Send {
        #[arg(long)]
        from: i64,
        #[arg(long)]
        to: i64,
        #[arg(long)]
        content: String,
        #[arg(long)]
        task: Option<i64>,
    },
    /// task の customer と agreement 相手の間のメッセージ（古い順）
    Thread {
        #[arg(long)]
        user: i64,
        #[arg(long)]
        task: i64,
    },
}

#[derive(Debug, Serialize)]
struct CheckReport {
    sender: UserId,
    receiver: UserId,
    allowed: bool,
    relation: Option<RelationKind>,
}

#[derive(Debug, Serialize)]
struct RecipientsReport {
    user: UserId,
    recipients: Vec<UserId>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()
        .with_fixture(cli.fixture.clone())
        .with_log_filter(cli.log.clone());

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config)?)
        .with_writer(std::io::stderr)
        .init();

    let seed = match &config.fixture_path {
        Some(path) => FactSeed::load(path)
            .with_context(|| format!("loading fixture {}", path.display()))?,
        None => {
            tracing::warn!("no fixture given; every check will be denied");
            FactSeed::default()
        }
    };
    let app = AppBuilder::new().with_seed(seed).build()?;

    run(&app, cli.command).await
}

/// 書き間違えた filter は黙って info に落とさずエラーにする
fn log_filter(config: &AppConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter {:?}", config.log_filter))
}

async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Check { from, to } => {
            let (sender, receiver) = (UserId::new(from), UserId::new(to));
            let relation = app.authorizer().grant_for(sender, receiver).await?;
            print_json(&CheckReport {
                sender,
                receiver,
                allowed: relation.is_some(),
                relation,
            })
        }
        Command::Recipients { user } => {
            let user = UserId::new(user);
            let recipients = app.messaging().recipients(user).await?;
            print_json(&RecipientsReport {
                user,
                recipients: recipients.into_iter().collect(),
            })
        }
        Command::Send {
            from,
            to,
            content,
            task,
        } => {
            let mut draft = MessageDraft::new(UserId::new(to), content);
            if let Some(task) = task {
                draft = draft.about_task(TaskId::new(task));
            }
            let message = app.messaging().send(UserId::new(from), draft).await?;
            print_json(&message)
        }
        Command::Thread { user, task } => {
            let thread = app
                .messaging()
                .task_thread(UserId::new(user), TaskId::new(task))
                .await?;
            print_json(&thread)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
