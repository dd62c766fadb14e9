use anyhow::Result;
use clap::Parser;
use pdf_quiz::cli::Cli;
use pdf_quiz::utils::logging;
use pdf_quiz::{App, Config, QuizError};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置，命令行参数优先
    let mut config = Config::load()?;
    if let Some(session) = &cli.session {
        config.session_file = session.display().to_string();
    }
    config.reshuffle_options |= cli.reshuffle;
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup(&config, cli.command.name());

    let mut app = App::initialize(config)?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    if let Err(e) = app.run(cli.command, stdin.lock(), &mut stdout).await {
        // 用户可处理的错误只显示提示，不打印调用链
        if let Some(quiz_err) = e.downcast_ref::<QuizError>() {
            tracing::error!("❌ {:#}", e);
            eprintln!("{}", quiz_err.user_message());
            if quiz_err.redirects_to_upload() {
                eprintln!("Run `pdf_quiz upload <FILE>` to load a document.");
            }
            std::process::exit(1);
        }
        return Err(e);
    }

    Ok(())
}
