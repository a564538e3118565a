//! 程序入口：初始化日志、解析命令行，并对一个 JSON 文件执行一次节点查看或编辑

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

use json_node_edit::vm::bridge::{
    render_session, render_tree, STATUS_ERROR_PREFIX, STATUS_LOADED, STATUS_WRITE_BACK_SUCCESS,
};
use json_node_edit::{parse_address, AppState, EditSession};

/// 按地址查看或编辑 JSON 文档中的单个节点
#[derive(Parser, Debug)]
#[command(name = "json_node_edit", version)]
#[command(about = "View or edit a single node of a JSON document", long_about = None)]
struct Cli {
    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 显示节点的可编辑文本与路径
    Show {
        /// JSON 文档
        file: PathBuf,
        /// 节点地址（JSON 数组，如 '["fruits", 0]'）
        #[arg(long, default_value = "[]")]
        path: String,
    },
    /// 以草稿内容保存节点，并写回文件
    Edit {
        file: PathBuf,
        #[arg(long, default_value = "[]")]
        path: String,
        /// 编辑后的 JSON 文本
        #[arg(long)]
        draft: String,
        /// 另存路径（默认覆盖原文件）
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// 列出文档中所有可寻址节点
    Tree { file: PathBuf },
}

fn load(file: &Path) -> Result<AppState> {
    let mut state = AppState::default();
    state
        .load_file(file)
        .with_context(|| format!("无法加载文件: {}", file.display()))?;
    tracing::info!("{}", STATUS_LOADED);
    Ok(state)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Show { file, path } => {
            let state = load(&file)?;
            let address = parse_address(&path)?;
            let session = EditSession::open(state.fields_at(&address)?, address);
            println!("{}", render_session(&session));
        }
        Command::Edit { file, path, draft, output } => {
            let mut state = load(&file)?;
            let address = parse_address(&path)?;
            let mut session = EditSession::open(state.fields_at(&address)?, address);
            session.begin_edit();
            session.set_draft(draft);
            if let Err(e) = session.save(&mut state) {
                // 错误本身由 main 统一输出，这里只显示保留的草稿
                eprintln!("{}", render_session(&session));
                return Err(e).context("节点未保存");
            }
            match output {
                Some(out) => state.save_to_file(&out)?,
                None => state.save_to_original_file()?,
            }
            println!("{}", STATUS_WRITE_BACK_SUCCESS);
        }
        Command::Tree { file } => {
            let state = load(&file)?;
            println!("{}", render_tree(&state.tree_flat));
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // 初始化日志输出（写到 stderr，stdout 留给结果）
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let _ = SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(e) = run(cli) {
        eprintln!("{}{:#}", STATUS_ERROR_PREFIX, e);
        process::exit(1);
    }
}
