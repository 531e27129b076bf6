use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use agentsheet::{logging, AgentSheetError, AnalyzerBuilder, Keywords, OutputFormat};

#[derive(Parser)]
#[command(name = "agentsheet")]
#[command(about = "営業用スプレッドシートから音声エージェントの指示文を生成", long_about = None)]
struct Cli {
    /// 入力スプレッドシート（.xlsx / .xls / .ods / .csv）
    input: PathBuf,

    /// 出力形式
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// 出力ファイル（省略時は標準出力）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// キーワード表のJSONファイル
    #[arg(short, long)]
    keywords: Option<PathBuf>,

    /// 会社名が見つからない場合の会社名
    #[arg(long)]
    company: Option<String>,

    /// レコード一覧を指示文に含めない
    #[arg(long)]
    no_data_summary: bool,

    /// モード説明を指示文に含めない
    #[arg(long)]
    no_context: bool,

    /// 詳細ログを出力
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// 最終的な指示文
    Text,
    /// 解析結果全体
    Json,
    /// プロファイルのみ
    Profile,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Profile => OutputFormat::Profile,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        handle_error(e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AgentSheetError> {
    let mut builder = AnalyzerBuilder::new()
        .include_data_summary(!cli.no_data_summary)
        .include_context(!cli.no_context);

    if let Some(path) = &cli.keywords {
        builder = builder.with_keywords(Keywords::from_json_reader(File::open(path)?)?);
    }
    if let Some(company) = &cli.company {
        builder = builder.with_default_company(company.clone());
    }

    let analyzer = builder.build()?;
    let config = analyzer.analyze_path(&cli.input)?;
    let rendered = config.render(cli.format.into())?;

    match &cli.output {
        Some(path) => {
            let mut file = File::create(path)?;
            writeln!(file, "{}", rendered)?;
            tracing::info!(output = %path.display(), "wrote result");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", rendered)?;
            handle.flush()?;
        }
    }

    Ok(())
}

fn handle_error(error: AgentSheetError) {
    match error {
        AgentSheetError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
        }
        AgentSheetError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("Hint: Make sure the input is a valid .xlsx, .xls, .ods, or .csv file");
        }
        AgentSheetError::Csv(csv_err) => {
            eprintln!("CSV Error: {}", csv_err);
        }
        AgentSheetError::Json(json_err) => {
            eprintln!("JSON Error: {}", json_err);
        }
        AgentSheetError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
        }
        AgentSheetError::SecurityViolation(msg) => {
            eprintln!("Security Error: {}", msg);
        }
    }
}
