//! `halberd`: command-line interface for HAL+JSON documents.
//!
//! Provides four subcommands:
//!
//! - **`validate`**: check that a document (or array of documents) parses
//!   into resources with well-formed links.
//! - **`render`**: re-emit a document as HAL+JSON or HAL+XML.
//! - **`links`**: list the links of a document, optionally by relation.
//! - **`new`**: build a resource from flags and print it as HAL+JSON.
//!
//! Input is read from a file path or from stdin (`-`). Logs go to stderr and
//! are controlled by `--log` / `HALBERD_LOG`.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use halberd::{Resource, ValidationError};
use halberd::value::{coerce_to_string, to_pretty_string};
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

/// halberd: HAL+JSON / HAL+XML tool
///
/// Validate, inspect and render hypermedia resources.
#[derive(Parser)]
#[command(name = "halberd", version, about, long_about = None)]
struct Cli {
    /// Log filter in `tracing` EnvFilter syntax. Logs are written to stderr.
    #[arg(long, global = true, env = "HALBERD_LOG", default_value = "halberd=warn")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Xml,
}

#[derive(Subcommand)]
enum Command {
    /// Validate one or more HAL+JSON documents.
    ///
    /// Reads a JSON file containing either a single resource or an array of
    /// resources. Exits 0 if every link is well-formed, 1 otherwise.
    ///
    /// Pass `-` as FILE to read from stdin.
    Validate {
        /// Path to a JSON file, or `-` for stdin.
        file: PathBuf,
    },

    /// Render a document as HAL+JSON or HAL+XML.
    ///
    /// With an empty indent, JSON is compact and XML fits on one line.
    Render {
        /// Path to a JSON file, or `-` for stdin.
        file: PathBuf,

        /// Output dialect.
        #[arg(short, long, value_enum, env = "HALBERD_FORMAT", default_value_t = Format::Json)]
        format: Format,

        /// Indentation unit, e.g. "  " or a tab.
        #[arg(short, long, env = "HALBERD_INDENT", default_value = "")]
        indent: String,
    },

    /// List links as `rel<TAB>href`, one per line.
    Links {
        /// Path to a JSON file, or `-` for stdin.
        file: PathBuf,

        /// Only these relations, in this order. Repeat for several.
        #[arg(long = "rel", value_name = "REL")]
        rels: Vec<String>,
    },

    /// Build a resource and print it as HAL+JSON.
    ///
    /// Examples:
    ///   halberd new --href /orders --link next=/orders?page=2 --prop shippedToday=20
    ///   halberd new --prop 'tags=["a","b"]' --prop status=shipped
    New {
        /// Target of the self link.
        #[arg(long, value_name = "URI")]
        href: Option<String>,

        /// A link as REL=HREF. Repeat for several; a repeated REL becomes a list.
        #[arg(long = "link", value_name = "REL=HREF")]
        links: Vec<String>,

        /// A property as KEY=VALUE. VALUE is parsed as JSON when it can be,
        /// otherwise kept as a string.
        #[arg(long = "prop", value_name = "KEY=VALUE")]
        props: Vec<String>,

        /// Indentation unit for the printed JSON.
        #[arg(short, long, env = "HALBERD_INDENT", default_value = "  ")]
        indent: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    match cli.command {
        Command::Validate { file } => {
            let documents = parse_documents(&read_input(&file));
            let total = documents.len();
            let mut all_valid = true;
            for (i, document) in documents.into_iter().enumerate() {
                if let Err(e) = Resource::from_hal(document) {
                    if total == 1 {
                        eprintln!("error: {}", e);
                    } else {
                        eprintln!("error in resource {}: {}", i, e);
                    }
                    all_valid = false;
                }
            }
            if all_valid {
                if total == 1 {
                    println!("valid");
                } else {
                    println!("all {} resources valid", total);
                }
            } else {
                process::exit(1);
            }
        }

        Command::Render { file, format, indent } => {
            let resources = load_resources(&file);
            tracing::debug!(count = resources.len(), ?format, "rendering");
            println!("{}", render(&resources, format, &indent));
        }

        Command::Links { file, rels } => {
            for resource in load_resources(&file) {
                let links = if rels.is_empty() {
                    resource.links()
                } else {
                    resource.links_for_all(&rels)
                };
                for link in links {
                    let href = link.get("href").map(coerce_to_string).unwrap_or_default();
                    println!("{}\t{}", link.rel(), href);
                }
            }
        }

        Command::New { href, links, props, indent } => {
            let resource = build_resource(href, &links, &props).unwrap_or_else(|e| fatal(&e));
            let json = resource
                .to_json_pretty(&indent)
                .unwrap_or_else(|e| fatal(&format!("failed to encode JSON: {}", e)));
            println!("{}", json);
        }
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("halberd: invalid log filter {:?} ({}), using defaults", filter, e);
        EnvFilter::new("halberd=warn")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read the full contents of a file, or stdin when the path is `"-"`.
fn read_input(path: &PathBuf) -> String {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {}", e)));
        buf
    } else {
        fs::read_to_string(path).unwrap_or_else(|e| {
            fatal(&format!("failed to read {}: {}", path.display(), e))
        })
    }
}

/// Split input into documents: an array yields its members, anything else is
/// one document.
fn parse_documents(json: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Array(items)) => {
            if items.is_empty() {
                fatal("input contains an empty array, nothing to process");
            }
            items
        }
        Ok(single) => vec![single],
        Err(e) => fatal(&format!("failed to parse input as JSON: {}", e)),
    }
}

/// Parse every document, exiting on the first invalid one.
fn load_resources(path: &PathBuf) -> Vec<Resource> {
    parse_documents(&read_input(path))
        .into_iter()
        .map(Resource::from_hal)
        .collect::<Result<Vec<_>, ValidationError>>()
        .unwrap_or_else(|e| fatal(&format!("invalid resource: {}", e)))
}

fn render(resources: &[Resource], format: Format, indent: &str) -> String {
    match format {
        Format::Json => {
            let value = match resources {
                [single] => single.to_json(),
                many => Value::Array(many.iter().map(Resource::to_json).collect()),
            };
            if indent.is_empty() {
                value.to_string()
            } else {
                to_pretty_string(&value, indent)
                    .unwrap_or_else(|e| fatal(&format!("failed to encode JSON: {}", e)))
            }
        }
        Format::Xml => resources
            .iter()
            .map(|r| r.to_xml(indent))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Assemble a resource from `new` flags.
fn build_resource(
    href: Option<String>,
    links: &[String],
    props: &[String],
) -> Result<Resource, String> {
    let mut properties = Map::new();
    for raw in props {
        let (key, value) = split_pair(raw, "--prop", "KEY=VALUE")?;
        properties.insert(key.to_string(), parse_property_value(value));
    }

    let mut resource = Resource::from_map(properties, href.map(Into::into))
        .map_err(|e| format!("resource is invalid: {}", e))?;

    for raw in links {
        let (rel, target) = split_pair(raw, "--link", "REL=HREF")?;
        resource
            .link(rel, target)
            .map_err(|e| format!("invalid --link {:?}: {}", raw, e))?;
    }

    Ok(resource)
}

fn split_pair<'a>(raw: &'a str, flag: &str, shape: &str) -> Result<(&'a str, &'a str), String> {
    raw.split_once('=')
        .ok_or_else(|| format!("invalid {} {:?}: expected format {}", flag, raw, shape))
}

/// JSON when it parses (`20`, `true`, `["a"]`), the raw text otherwise.
fn parse_property_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("halberd: {}", msg);
    process::exit(2);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn property_values_prefer_json() {
        assert_eq!(parse_property_value("20"), json!(20));
        assert_eq!(parse_property_value("true"), json!(true));
        assert_eq!(parse_property_value(r#"["a","b"]"#), json!(["a", "b"]));
        assert_eq!(parse_property_value("shipped"), json!("shipped"));
    }

    #[test]
    fn split_pair_requires_separator() {
        assert_eq!(split_pair("next=/p?x=1", "--link", "REL=HREF"), Ok(("next", "/p?x=1")));
        assert!(split_pair("next", "--link", "REL=HREF").is_err());
    }

    #[test]
    fn build_resource_from_flags() {
        let resource = build_resource(
            Some("/orders".into()),
            &["next=/orders?page=2".into(), "next=/orders?page=3".into()],
            &["shippedToday=20".into(), "currency=USD".into()],
        )
        .unwrap();
        assert_eq!(
            resource.to_json_string(),
            concat!(
                r#"{"_links":{"self":{"href":"/orders"},"#,
                r#""next":[{"href":"/orders?page=2"},{"href":"/orders?page=3"}]},"#,
                r#""shippedToday":20,"currency":"USD"}"#
            )
        );
    }

    #[test]
    fn build_resource_reports_bad_links() {
        let err = build_resource(None, &["next=".into()], &[]).unwrap_err();
        assert!(err.contains("--link"), "{err}");
    }

    #[test]
    fn render_indented_json() {
        let res = Resource::with_self(json!({"n": 1}), "/a").unwrap();
        assert_eq!(
            render(&[res], Format::Json, "  "),
            "{\n  \"_links\": {\n    \"self\": {\n      \"href\": \"/a\"\n    }\n  },\n  \"n\": 1\n}"
        );
    }

    #[test]
    fn render_many_as_json_array_and_xml_lines() {
        let a = Resource::with_self(json!({}), "/a").unwrap();
        let b = Resource::with_self(json!({}), "/b").unwrap();
        let resources = [a, b];
        assert_eq!(
            render(&resources, Format::Json, ""),
            r#"[{"_links":{"self":{"href":"/a"}}},{"_links":{"self":{"href":"/b"}}}]"#
        );
        assert_eq!(
            render(&resources, Format::Xml, ""),
            "<resource href=\"/a\"></resource>\n<resource href=\"/b\"></resource>"
        );
    }
}
