use clap::{Parser as ClapParser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use rkyv::{AlignedVec, Deserialize, Infallible};
use sona_protocol::{Dialect, Dictionary, Vocabulary};
use sona_parser::{ParseCache, Parser};
use sona_solver::Facts;
use tracing::{debug, Level};

#[derive(ClapParser)]
#[command(author, version, about = "toki pona sentence parser and lexicon compiler")]
struct Cli {
    /// Lexicon to parse against (.json or compiled .rkyv); defaults to the built-in word list
    #[arg(short, long, value_name = "FILE", global = true)]
    lexicon: Option<PathBuf>,

    /// Reject `li pi` along with every other particle pair
    #[arg(long, global = true)]
    strict: bool,

    /// -v for debug logs, -vv for trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compiles a JSON dictionary to an rkyv binary
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Parses normalized sentences and prints their trees
    Parse {
        #[arg(required = true)]
        sentences: Vec<String>,

        /// Print JSON instead of the debug tree
        #[arg(long)]
        json: bool,
    },
    /// Answers a seme question from the given facts
    Ask {
        #[arg(short, long = "fact", value_name = "SENTENCE", required = true)]
        facts: Vec<String>,

        question: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let dialect = if cli.strict { Dialect::strict() } else { Dialect::default() };

    match &cli.command {
        Command::Compile { input, output } => compile(input, output),
        Command::Parse { sentences, json } => {
            let vocabulary = load_lexicon(cli.lexicon.as_deref())?;
            parse(&vocabulary, dialect, sentences, *json)
        }
        Command::Ask { facts, question } => {
            let vocabulary = load_lexicon(cli.lexicon.as_deref())?;
            ask(&vocabulary, dialect, facts, question)
        }
    }
}

fn compile(input: &Path, output: &Path) -> anyhow::Result<()> {
    println!("📖 Reading JSON from {:?}...", input);
    let input_data = fs::read_to_string(input)?;

    // 1. Deserialize JSON to Rust Structs
    let dict: Dictionary = serde_json::from_str(&input_data)
        .with_context(|| format!("{:?} is not a valid dictionary", input))?;

    println!(
        "⚙️  Compiling Dictionary version {} with {} words and {} compounds...",
        dict.version,
        dict.entries.len(),
        dict.compounds.len()
    );

    // 2. Serialize to RKYV and write
    let bytes = compile_dictionary(&dict)?;
    fs::write(output, &bytes)?;

    println!("✅ Success! Binary written to {:?}", output);
    Ok(())
}

fn compile_dictionary(dict: &Dictionary) -> anyhow::Result<AlignedVec> {
    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(dict)
        .map_err(|e| anyhow::anyhow!("Failed to rkyv serialize: {:?}", e))?;
    Ok(serializer.into_serializer().into_inner())
}

/// Validates a compiled lexicon before trusting it.
fn read_dictionary(bytes: &[u8]) -> anyhow::Result<Dictionary> {
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);

    let archived = rkyv::check_archived_root::<Dictionary>(&aligned)
        .map_err(|e| anyhow::anyhow!("Corrupt lexicon: {}", e))?;
    Ok(archived
        .deserialize(&mut Infallible)
        .unwrap_or_else(|never| match never {}))
}

fn load_lexicon(path: Option<&Path>) -> anyhow::Result<Vocabulary> {
    let Some(path) = path else {
        debug!("using the built-in vocabulary");
        return Ok(Vocabulary::builtin());
    };

    let dict: Dictionary = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&fs::read_to_string(path)?)
            .with_context(|| format!("{:?} is not a valid dictionary", path))?,
        _ => read_dictionary(&fs::read(path)?)?,
    };
    debug!(words = dict.entries.len(), compounds = dict.compounds.len(), "lexicon loaded");
    Ok(Vocabulary::from(&dict))
}

fn parse(vocabulary: &Vocabulary, dialect: Dialect, sentences: &[String], json: bool) -> anyhow::Result<()> {
    let parser = Parser::new(vocabulary).with_dialect(dialect);
    let mut cache = ParseCache::new();
    let mut failures = 0;

    for text in sentences {
        match parser.parse_with_cache(text, text, &mut cache) {
            Ok(sentence) if json => println!("{}", serde_json::to_string_pretty(&sentence)?),
            Ok(sentence) => println!("{}\n{:#?}", sentence, sentence),
            Err(err) => {
                failures += 1;
                eprintln!("❌ {:?} error: {}", err.kind(), err);
            }
        }
    }
    debug!(entries = cache.len(), hits = cache.hits(), "parse cache");

    if failures > 0 {
        bail!("{} of {} sentences failed to parse", failures, sentences.len());
    }
    Ok(())
}

fn ask(vocabulary: &Vocabulary, dialect: Dialect, facts: &[String], question: &str) -> anyhow::Result<()> {
    let parser = Parser::new(vocabulary).with_dialect(dialect);

    let mut known = Facts::new();
    for fact in facts {
        known.tell(parser.parse(fact, fact)?);
    }
    let question = parser.parse(question, question)?;

    let answer = known.ask(&question)?;
    println!("{}", answer);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compiled_lexicon_loads_back() {
        let dict = Dictionary::builtin();
        let bytes = compile_dictionary(&dict).unwrap();

        let loaded = read_dictionary(&bytes).unwrap();
        assert_eq!(loaded, dict);
    }

    #[test]
    fn test_corrupt_lexicon_is_rejected() {
        assert!(read_dictionary(&[0xde, 0xad, 0xbe, 0xef]).is_err());
    }

    #[test]
    fn test_ask_finds_answer() {
        let vocabulary = Vocabulary::builtin();
        let facts = vec!["jan li moku e kili.".to_string()];
        assert!(ask(&vocabulary, Dialect::default(), &facts, "jan li moku e seme?").is_ok());
        assert!(ask(&vocabulary, Dialect::default(), &facts, "jan li lape e seme?").is_err());
    }
}
