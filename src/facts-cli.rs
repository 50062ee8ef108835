use std::env;
use color_eyre::Result;
use eyre::{WrapErr, eyre};
use dotenv::dotenv;
use log::info;
use getopts::{Matches, Options};
use facts_backend::client::{render, FactBoard, Notifier, SubmitOutcome};
use facts_backend::config::Config;
use facts_backend::db::entities::{CategoryFilter, VoteKind};
use facts_backend::db::PostgrestClient;

// Failures go to stderr, same as an alert box would
// interrupt the page.
struct StderrNotifier;

impl Notifier for StderrNotifier {
  fn notify(&self, message: &str) {
    eprintln!("{}", message);
  }
}

type Board = FactBoard<PostgrestClient, StderrNotifier>;

// Copy pasted this from getopts doc.
fn print_usage(program: &str, opts: Options) {
  let brief = format!(
    "Usage: {} COMMAND [options]\n\n\
    Commands:\n  \
      list        Show facts, most interesting first\n  \
      add         Share a new fact\n  \
      vote        Vote on a fact\n  \
      categories  List the categories",
    program
  );
  print!("{}", opts.usage(&brief));
}

fn category_filter(matches: &Matches) -> Result<CategoryFilter> {
  match matches.opt_str("c") {
    Some(c) => Ok(c.parse::<CategoryFilter>()?),
    None => Ok(CategoryFilter::All)
  }
}

async fn list(board: &mut Board, matches: &Matches) -> Result<()> {
  if board.set_category(category_filter(matches)?).await {
    println!("{}", render::render_list(board.facts()));
  }
  Ok(())
}

async fn add(board: &mut Board, matches: &Matches) -> Result<()> {
  board.toggle_form();
  board.form.text = matches.opt_str("t").unwrap_or_default();
  board.form.source = matches.opt_str("s").unwrap_or_default();
  board.form.category = matches.opt_str("c").unwrap_or_default();
  match board.submit().await {
    SubmitOutcome::Posted(id) => {
      info!("Fact {} was shared", id);
      println!("{}", render::render_fact(&board.facts()[0]));
    },
    // Nothing printed, the form just doesn't go through.
    SubmitOutcome::Blocked => {},
    SubmitOutcome::Failed => {}
  }
  Ok(())
}

async fn vote(board: &mut Board, matches: &Matches) -> Result<()> {
  let id: i64 = matches.opt_str("i")
    .ok_or_else(|| eyre!("vote needs a fact id (-i)"))?
    .parse::<i64>()
    .context("Parsing the fact id")?;
  let kind: VoteKind = matches.opt_str("k")
    .unwrap_or_else(|| "interesting".to_string())
    .parse::<VoteKind>()
    .map_err(|e| eyre!(e))?;
  // Votes are cast on what's displayed, so load first.
  if !board.set_category(category_filter(matches)?).await {
    return Ok(());
  }
  if board.vote(id, kind).await {
    if let Some(fact) = board.facts().iter().find(|f| f.id == id) {
      println!("{}", render::render_fact(fact));
    }
  }
  Ok(())
}

/**
 * Terminal version of the fact page. Talks directly to
 * the hosted database, like the browser does.
 */
#[actix_web::main]
async fn main() -> Result<()> {
  dotenv().ok();
  env_logger::init();
  color_eyre::install()?;

  let args: Vec<String> = env::args().collect();
  let program = args[0].clone();
  let mut opts = Options::new();
  opts.optopt("c", "category", "Category to filter on or to file the fact under", "CATEGORY");
  opts.optopt("t", "text", "Text of the fact (200 characters max)", "TEXT");
  opts.optopt("s", "source", "Trustworthy source (http or https URL)", "URL");
  opts.optopt("i", "id", "Fact to vote on", "ID");
  opts.optopt("k", "kind", "Vote: interesting, mindblowing or false", "KIND");
  opts.optflag("h", "help", "Program usage");
  let opt_matches = opts.parse(&args[1..])?;
  if opt_matches.opt_present("h") || opt_matches.free.is_empty() {
    print_usage(&program, opts);
    return Ok(());
  }

  let command = opt_matches.free[0].clone();
  if command == "categories" {
    print!("{}", render::render_categories());
    return Ok(());
  }

  let config = Config::from_env()
    .context("Configuration (environment or .env file) is missing")?;
  let store = PostgrestClient::new(
    &config.supabase_url,
    config.client_key()?,
    &config.facts_table,
    config.db_timeout()
  )?;
  let mut board = FactBoard::new(store, StderrNotifier);

  match command.as_str() {
    "list" => list(&mut board, &opt_matches).await,
    "add" => add(&mut board, &opt_matches).await,
    "vote" => vote(&mut board, &opt_matches).await,
    _ => Err(eyre!("Unknown command: {}", command))
  }
}
