use std::fmt;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use goi_core::model::{DifficultyRating, QuizSettings, WordEntry, WordLevel};
use services::{AppServices, Clock, DirFeed, HttpFeed, LessonFeed, WordQuery};
use storage::JsonFileStore;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLesson { raw: String },
    InvalidLevel { raw: String },
    InvalidNumber { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLesson { raw } => write!(f, "invalid --lesson value: {raw}"),
            ArgsError::InvalidLevel { raw } => write!(f, "invalid --level value: {raw}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Stats,
    Lessons,
    Search,
    Quiz,
    Cards,
    Kanji,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "stats" => Some(Self::Stats),
            "lessons" => Some(Self::Lessons),
            "search" => Some(Self::Search),
            "quiz" => Some(Self::Quiz),
            "cards" => Some(Self::Cards),
            "kanji" => Some(Self::Kanji),
            _ => None,
        }
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- stats");
    eprintln!("  cargo run -p app -- lessons");
    eprintln!("  cargo run -p app -- search <text> [--category <name>] [--level <level>] [--lesson <n>]");
    eprintln!("  cargo run -p app -- quiz  [--lesson <n>] [--questions <n>] [--duration <seconds>]");
    eprintln!("  cargo run -p app -- cards --lesson <n>");
    eprintln!("  cargo run -p app -- kanji");
    eprintln!();
    eprintln!("Shared flags:");
    eprintln!("  --data-dir <dir>      vocabulary JSON directory (default: data)");
    eprintln!("  --feed-url <url>      fetch vocabulary over HTTP instead of --data-dir");
    eprintln!("  --state-file <path>   progress and cache file (default: goi_state.json)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GOI_DATA_DIR, GOI_FEED_URL, GOI_STATE_FILE, GOI_LOG");
}

struct Args {
    state_file: PathBuf,
    data_dir: PathBuf,
    feed_url: Option<String>,
    lesson: Option<u32>,
    category: Option<String>,
    level: Option<WordLevel>,
    questions: Option<usize>,
    duration: Option<u32>,
    terms: Vec<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut state_file = std::env::var("GOI_STATE_FILE")
            .ok()
            .map_or_else(|| PathBuf::from("goi_state.json"), PathBuf::from);
        let mut data_dir = std::env::var("GOI_DATA_DIR")
            .ok()
            .map_or_else(|| PathBuf::from("data"), PathBuf::from);
        let mut feed_url = std::env::var("GOI_FEED_URL").ok();
        let mut lesson = None;
        let mut category = None;
        let mut level = None;
        let mut questions = None;
        let mut duration = None;
        let mut terms = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--state-file" => {
                    state_file = PathBuf::from(require_value(args, "--state-file")?);
                }
                "--data-dir" => {
                    data_dir = PathBuf::from(require_value(args, "--data-dir")?);
                }
                "--feed-url" => {
                    feed_url = Some(require_value(args, "--feed-url")?);
                }
                "--lesson" => {
                    let value = require_value(args, "--lesson")?;
                    lesson = Some(
                        value
                            .parse()
                            .map_err(|_| ArgsError::InvalidLesson { raw: value.clone() })?,
                    );
                }
                "--category" => {
                    category = Some(require_value(args, "--category")?);
                }
                "--level" => {
                    let value = require_value(args, "--level")?;
                    level = Some(
                        value
                            .parse::<WordLevel>()
                            .map_err(|_| ArgsError::InvalidLevel { raw: value.clone() })?,
                    );
                }
                "--questions" => {
                    let value = require_value(args, "--questions")?;
                    questions = Some(value.parse().map_err(|_| ArgsError::InvalidNumber {
                        flag: "--questions",
                        raw: value.clone(),
                    })?);
                }
                "--duration" => {
                    let value = require_value(args, "--duration")?;
                    duration = Some(value.parse().map_err(|_| ArgsError::InvalidNumber {
                        flag: "--duration",
                        raw: value.clone(),
                    })?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => terms.push(arg),
            }
        }

        Ok(Self {
            state_file,
            data_dir,
            feed_url,
            lesson,
            category,
            level,
            questions,
            duration,
            terms,
        })
    }

    /// Settings override when --questions or --duration were given.
    fn quiz_settings(&self) -> Result<Option<QuizSettings>, Box<dyn std::error::Error>> {
        if self.questions.is_none() && self.duration.is_none() {
            return Ok(None);
        }
        let defaults = QuizSettings::default();
        let settings = QuizSettings::new(
            self.questions.unwrap_or(defaults.question_count()),
            self.duration.unwrap_or(defaults.duration_seconds()),
            defaults.option_count(),
        )?;
        Ok(Some(settings))
    }
}

fn init_tracing() {
    let level = std::env::var("GOI_LOG").unwrap_or_else(|_| "warn".into());
    // Logs go to stderr so they never interleave with the interactive output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: show the study stats when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Stats,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Stats,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    let store = Arc::new(JsonFileStore::open(&parsed.state_file)?);
    let feed: Box<dyn LessonFeed> = match parsed.feed_url.as_deref() {
        Some(url) => Box::new(HttpFeed::new(url)?),
        None => Box::new(DirFeed::new(&parsed.data_dir)),
    };

    let mut services = AppServices::load(store, feed.as_ref(), Clock::default()).await;
    if let Some(settings) = parsed.quiz_settings()? {
        services = services.with_settings(settings);
    }

    match cmd {
        Command::Stats => {
            print_stats(&services);
            Ok(())
        }
        Command::Lessons => {
            print_lessons(&services);
            Ok(())
        }
        Command::Search => {
            print_search(&services, &parsed);
            Ok(())
        }
        Command::Quiz => run_quiz(&mut services, parsed.lesson),
        Command::Cards => run_cards(&mut services, parsed.lesson),
        Command::Kanji => run_kanji(&mut services),
    }
}

fn print_stats(services: &AppServices) {
    let snapshot = services.tracker().snapshot();
    println!("Words studied:     {}", snapshot.words_studied);
    println!("Day streak:        {}", snapshot.streak_days);
    println!("Quiz accuracy:     {}%", snapshot.accuracy_percent);
    println!("Lessons completed: {}", snapshot.lessons_completed);

    let recent = services.tracker().recent_words(4);
    if !recent.is_empty() {
        println!();
        println!("Recently studied:");
        for id in recent {
            match id.parts() {
                (Some(japanese), Some(vietnamese)) => println!("  {japanese} - {vietnamese}"),
                _ => println!("  {id}"),
            }
        }
    }

    if let Some(date) = services.tracker().record().last_study_date() {
        println!();
        println!("Last studied: {date}");
    }
}

fn print_lessons(services: &AppServices) {
    let record = services.tracker().record();
    for lesson in services.library().lessons() {
        let done = if record.is_lesson_completed(lesson.ordinal()) {
            "  [done]"
        } else {
            ""
        };
        let score = match record.quiz_score_for(lesson.ordinal()) {
            Some(percent) => format!(", best quiz {percent}%"),
            None => String::new(),
        };
        println!(
            "{:>2}  {} ({} words{score}){done}",
            lesson.ordinal(),
            lesson.name(),
            lesson.word_count()
        );
    }
    println!();
    println!(
        "{} lessons, {} words",
        services.library().lessons().len(),
        services.library().word_total()
    );
}

fn print_search(services: &AppServices, args: &Args) {
    let mut query = WordQuery::new().with_text(args.terms.join(" "));
    if let Some(category) = args.category.as_deref() {
        query = query.with_category(category);
    }
    if let Some(level) = args.level {
        query = query.with_level(level);
    }
    if let Some(lesson) = args.lesson {
        query = query.with_lesson(lesson);
    }

    let found = services.library().search(&query);
    if found.is_empty() {
        println!("no matches");
        return;
    }
    for word in &found {
        println!("{}", format_word_line(word));
    }
    println!();
    println!("{} match(es)", found.len());
}

fn format_word_line(word: &WordEntry) -> String {
    let mut line = format!("{} - {}", word.japanese(), word.vietnamese());
    if let Some(romanji) = word.romanji() {
        line.push_str(&format!(" ({romanji})"));
    }
    if let Some(category) = word.category() {
        line.push_str(&format!(" [{category}]"));
    }
    line
}

fn run_quiz(
    services: &mut AppServices,
    lesson: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = services.start_quiz(lesson)?;
    println!(
        "{} questions, {} seconds. Answer with the option number, or q to stop early.",
        session.total_questions(),
        session.time_remaining()
    );

    let stdin = std::io::stdin();
    let mut input = String::new();
    let mut last_tick = Instant::now();

    while !session.is_finished() {
        let (prompt, options) = {
            let Some(question) = session.current_question() else {
                break;
            };
            (question.prompt().to_string(), question.options().to_vec())
        };

        println!();
        println!(
            "[{}/{}] ({}s left) {prompt}",
            session.question_number(),
            session.total_questions(),
            session.time_remaining()
        );
        for (index, option) in options.iter().enumerate() {
            println!("  {}) {option}", index + 1);
        }

        print!("> ");
        std::io::stdout().flush()?;
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }

        // Bill the seconds spent reading against the countdown.
        let now = Instant::now();
        for _ in 0..now.duration_since(last_tick).as_secs() {
            session.tick();
        }
        last_tick = now;
        if session.is_finished() {
            println!("Time is up.");
            break;
        }

        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("q") {
            break;
        }
        let chosen = match trimmed.parse::<usize>() {
            Ok(number) if (1..=options.len()).contains(&number) => &options[number - 1],
            _ => {
                println!("enter a number between 1 and {}", options.len());
                continue;
            }
        };

        let outcome = session.answer(chosen)?;
        if outcome.correct {
            println!("correct");
        } else {
            println!("wrong, the answer is: {}", outcome.correct_answer);
        }
    }

    let report = session.report();
    println!();
    println!(
        "Score: {}/{} ({}%) in {} seconds",
        report.score, report.total, report.accuracy_percent, report.elapsed_seconds
    );

    if let Some(ordinal) = lesson {
        services.tracker_mut().record_quiz_report(ordinal, &report)?;
        println!("saved as lesson {ordinal} quiz score");
    }
    Ok(())
}

fn run_cards(
    services: &mut AppServices,
    lesson: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(ordinal) = lesson else {
        eprintln!("cards needs --lesson <n>");
        print_usage();
        return Err(Box::new(ArgsError::MissingValue { flag: "--lesson" }));
    };

    let mut session = services.start_flashcards(ordinal)?;
    println!(
        "{} cards. f flip, n next, p prev, s shuffle, 1 easy, 2 normal, 3 difficult, c complete lesson, q quit.",
        session.card_count()
    );

    let stdin = std::io::stdin();
    let mut input = String::new();
    loop {
        print_word_card(&session);
        print!("> ");
        std::io::stdout().flush()?;
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }

        match input.trim() {
            "f" => session.flip(),
            "n" | "" => session.next(),
            "p" => session.prev(),
            "s" => session.toggle_shuffle(),
            "1" => session.mark_difficulty(services.tracker_mut(), DifficultyRating::Easy)?,
            "2" => session.mark_difficulty(services.tracker_mut(), DifficultyRating::Normal)?,
            "3" => session.mark_difficulty(services.tracker_mut(), DifficultyRating::Difficult)?,
            "c" => {
                if services.tracker_mut().mark_lesson_completed(ordinal)? {
                    println!("lesson {ordinal} completed");
                }
            }
            "q" => break,
            other => println!("unknown command: {other}"),
        }
    }
    Ok(())
}

fn print_word_card(session: &services::FlashcardSession) {
    let word = session.current();
    let position = session.cursor().position() + 1;
    println!();
    if session.cursor().is_flipped() {
        println!(
            "[{position}/{}] {}",
            session.card_count(),
            format_word_line(word)
        );
        if let Some(example) = word.example() {
            println!("    e.g. {example}");
        }
    } else {
        println!("[{position}/{}] {}", session.card_count(), word.japanese());
    }
}

fn run_kanji(services: &mut AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let mut drill = services.start_kanji_drill()?;
    println!(
        "{} kanji. f flip, n next, p prev, s shuffle, 1 easy, 2 normal, 3 difficult, q quit.",
        drill.card_count()
    );

    let stdin = std::io::stdin();
    let mut input = String::new();
    loop {
        print_kanji_card(&drill);
        print!("> ");
        std::io::stdout().flush()?;
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }

        match input.trim() {
            "f" => drill.flip(),
            "n" | "" => drill.next(),
            "p" => drill.prev(),
            "s" => drill.toggle_shuffle(),
            "1" => drill.mark_difficulty(services.tracker_mut(), DifficultyRating::Easy)?,
            "2" => drill.mark_difficulty(services.tracker_mut(), DifficultyRating::Normal)?,
            "3" => drill.mark_difficulty(services.tracker_mut(), DifficultyRating::Difficult)?,
            "q" => break,
            other => println!("unknown command: {other}"),
        }
    }
    Ok(())
}

fn print_kanji_card(drill: &services::KanjiDrill) {
    let entry = drill.current();
    let position = drill.cursor().position() + 1;
    println!();
    if drill.cursor().is_flipped() {
        let mut line = entry.word().to_string();
        if let Some(phonetic) = entry.phonetic() {
            line.push_str(&format!(" ({phonetic})"));
        }
        if let Some(short_mean) = entry.short_mean() {
            line.push_str(&format!(" - {short_mean}"));
        }
        println!("[{position}/{}] {line}", drill.card_count());
        for meaning in entry.kanji_meanings() {
            println!("    {} = {}", meaning.kanji, meaning.mean);
        }
    } else {
        println!("[{position}/{}] {}", drill.card_count(), entry.word());
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
