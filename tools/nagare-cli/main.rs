use clap::{Parser, Subcommand, ValueEnum};
use nagare::graph::edge_segments;
use nagare::prelude::*;
use nagare::process::seed_if_empty;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Step kinds that can be added from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StepCli {
    Api,
    Email,
    Text,
}

impl From<StepCli> for NodeKind {
    fn from(step: StepCli) -> Self {
        match step {
            StepCli::Api => NodeKind::Api,
            StepCli::Email => NodeKind::Email,
            StepCli::Text => NodeKind::Text,
        }
    }
}

/// Compose, check and run linear business processes
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory holding the process collection (overrides the configuration)
    #[arg(long, global = true)]
    store_dir: Option<String>,

    /// Name recorded as the author of saved changes
    #[arg(short, long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all stored processes, most recently edited first
    List,
    /// Print the steps and connections of a process
    Show { id: String },
    /// Run the save validity check against a stored process
    Check { id: String },
    /// Simulate a run of a process and record its status
    Run { id: String },
    /// Create a process from a list of steps
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Step to append before end, may be repeated
        #[arg(long = "step", value_enum)]
        steps: Vec<StepCli>,
    },
    /// Edit a process interactively, or start a new one when no id is given
    Edit { id: Option<String> },
    /// Install the example processes into an empty store
    Seed,
    /// Write every process to a binary archive
    Export { path: String },
    /// Load processes from a binary archive, replacing those with the same id
    Import { path: String },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nagare=info,warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => NagareConfig::load(Path::new(path))
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => NagareConfig::default(),
    };
    if let Some(dir) = &cli.store_dir {
        config.store.dir = dir.into();
    }
    let mut store = JsonFileStore::from_config(&config.store);
    let identity = StaticIdentity(cli.user.clone());

    match cli.command {
        Command::List => list(&store),
        Command::Show { id } => show(&store, &id),
        Command::Check { id } => check(&store, &id, &config),
        Command::Run { id } => {
            let mut simulator = RandomSimulator::from_config(&config.simulator);
            let status = execute_process(&mut store, &mut simulator, &id)
                .unwrap_or_else(|e| exit_with_error(&format!("Run failed: {}", e)));
            println!("Process '{}' finished: {}", id, status);
        }
        Command::Create {
            name,
            description,
            steps,
        } => create(&mut store, &identity, &config, name, description, steps),
        Command::Edit { id } => {
            let session = match id {
                Some(id) => EditorSession::open(&store, &id, &config)
                    .unwrap_or_else(|e| exit_with_error(&e.to_string())),
                None => EditorSession::create(&config),
            };
            run_interactive(session, &mut store, &identity);
        }
        Command::Seed => {
            let count = seed_if_empty(&mut store)
                .unwrap_or_else(|e| exit_with_error(&format!("Seeding failed: {}", e)));
            println!("Installed {} example process(es)", count);
        }
        Command::Export { path } => {
            let archive = ProcessArchive::capture(&store)
                .unwrap_or_else(|e| exit_with_error(&format!("Export failed: {}", e)));
            archive
                .save(&path)
                .unwrap_or_else(|e| exit_with_error(&format!("Export failed: {}", e)));
            println!("Exported {} process(es) to '{}'", archive.processes.len(), path);
        }
        Command::Import { path } => {
            let count = ProcessArchive::from_file(&path)
                .and_then(|archive| archive.restore(&mut store))
                .unwrap_or_else(|e| exit_with_error(&format!("Import failed: {}", e)));
            println!("Imported {} process(es) from '{}'", count, path);
        }
    }
}

fn list(store: &JsonFileStore) {
    let processes = store
        .list()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to list processes: {}", e)));
    if processes.is_empty() {
        println!("No processes in '{}'", store.path().display());
        return;
    }
    for process in processes {
        println!(
            "{:<20} {:<30} {:<8} {} ({})",
            process.id,
            process.name,
            process.status,
            process.last_edited.author,
            process.last_edited.time
        );
    }
}

fn show(store: &JsonFileStore, id: &str) {
    let process = store
        .get(id)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()))
        .unwrap_or_else(|| exit_with_error(&format!("Process '{}' not found", id)));

    println!("{} [{}]", process.name, process.status);
    if !process.description.is_empty() {
        println!("  {}", process.description);
    }
    println!("  Tags: {}", process.tags.join(", "));
    println!(
        "  Last edited by {} at {}",
        process.last_edited.author, process.last_edited.time
    );
    print_graph(&process.nodes, &process.edges);
}

fn check(store: &JsonFileStore, id: &str, config: &NagareConfig) {
    let session = EditorSession::open(store, id, config)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    match session.check() {
        Ok(()) => println!("'{}' can be saved", session.name()),
        Err(e) => exit_with_error(&e.to_string()),
    }
}

fn create(
    store: &mut JsonFileStore,
    identity: &StaticIdentity,
    config: &NagareConfig,
    name: String,
    description: String,
    steps: Vec<StepCli>,
) {
    let mut session = EditorSession::create(config);
    session.set_name(name);
    session.set_description(description);
    // The "+" below end resolves to the before-end rule, so steps keep their order.
    let Some(end_id) = session.graph().end().map(|n| n.id.clone()) else {
        exit_with_error("A new process has no end node");
    };
    for step in steps {
        session.click_add_below(&end_id);
        session.choose_kind(step.into());
        session.cancel_configuration();
    }
    let process = session
        .save(store, identity)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    println!("Created process '{}' ({})", process.name, process.id);
}

fn print_graph(nodes: &[Node], edges: &[Edge]) {
    println!("  Steps:");
    for node in nodes {
        println!(
            "    {:<20} {:<6} {:<24} ({:.0}, {:.0})",
            node.id,
            node.kind(),
            node.label,
            node.position.x,
            node.position.y
        );
    }
    println!("  Connections:");
    for segment in edge_segments(nodes, edges) {
        if let Some(edge) = edges.iter().find(|e| e.id == segment.edge_id) {
            println!("    {} -> {}", edge.source, edge.target);
        }
    }
}

const HELP: &str = "\
Commands:
  show                        print steps and connections
  add <api|email|text> [x y]  add a step (at the default position unless x y is given)
  add-below <node> <kind>     add a step via the \"+\" button under a node
  configure <node>            open the configuration of a step
  set <field> <value...>      change a field of the step being configured
  done | cancel               save or discard the configuration
  connect <from> <to>         connect two steps
  delete <node>               delete a step and its connections
  move <node> <x> <y>         drag a step to a new position
  name <text...>              set the process name
  describe <text...>          set the process description
  zoom <in|out|reset>         change the zoom level
  check                       run the save validity check
  save                        save and exit
  quit                        exit without saving";

/// Runs an interactive editing session with prompts.
fn run_interactive(
    mut session: EditorSession,
    store: &mut JsonFileStore,
    identity: &StaticIdentity,
) {
    println!("--- Nagare Interactive Editor ---");
    println!("Type 'help' for a list of commands.");
    let mut pending: Option<NodePayload> = None;

    loop {
        let line = prompt_for_input(&format!("[{}]", session.mode()), None);
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };

        match (command, args) {
            ("help", _) => println!("{}", HELP),
            ("show", _) => {
                println!("{} [{}]", display_name(&session), session.status());
                print_graph(session.graph().nodes(), session.graph().edges());
            }
            ("add", [kind, rest @ ..]) => {
                let Some(kind) = parse_step(kind) else { continue };
                let opened = match rest {
                    [x, y] => match (x.parse(), y.parse()) {
                        (Ok(x), Ok(y)) => session.click_add_button(Position::new(x, y)),
                        _ => {
                            println!("Invalid position.");
                            continue;
                        }
                    },
                    _ => session.open_element_menu(),
                };
                if opened {
                    add_step(&mut session, kind, &mut pending);
                }
            }
            ("add-below", [node_id, kind]) => {
                let Some(kind) = parse_step(kind) else { continue };
                if session.click_add_below(node_id) {
                    add_step(&mut session, kind, &mut pending);
                } else {
                    println!("Cannot add below '{}'.", node_id);
                }
            }
            ("configure", [node_id]) => {
                if session.click_node(node_id) {
                    pending = session.graph().node(node_id).map(|n| n.payload.clone());
                } else {
                    println!("'{}' cannot be configured.", node_id);
                }
            }
            ("set", [field, value @ ..]) => match pending.as_mut() {
                Some(payload) => {
                    if !payload.set_field(field, &value.join(" ")) {
                        println!("Unknown or invalid field '{}'.", field);
                    }
                }
                None => println!("No step is being configured."),
            },
            ("done", _) => match pending.take() {
                Some(payload) => {
                    session.save_configuration(payload);
                }
                None => println!("No step is being configured."),
            },
            ("cancel", _) => {
                pending = None;
                if !session.cancel_configuration() {
                    session.dismiss_menu();
                }
            }
            ("connect", [from, to]) => {
                if !session.begin_connect(from) {
                    println!("Cannot connect from '{}' now.", from);
                    continue;
                }
                match session.select_target(to) {
                    Some(edge_id) => println!("Connected {} -> {} ({})", from, to, edge_id),
                    None => println!("No connection created."),
                }
            }
            ("delete", [node_id]) => {
                pending = None;
                match session.delete_node(node_id) {
                    Some(node) => println!("Deleted {} '{}'", node.kind(), node.label),
                    None => println!("No step '{}'.", node_id),
                }
            }
            ("move", [node_id, x, y]) => {
                let target = match (x.parse(), y.parse()) {
                    (Ok(x), Ok(y)) => Position::new(x, y),
                    _ => {
                        println!("Invalid position.");
                        continue;
                    }
                };
                let Some(origin) = session.graph().node(node_id).map(|n| n.position) else {
                    println!("No step '{}'.", node_id);
                    continue;
                };
                session.begin_drag(node_id, origin);
                session.drag_to(target);
                session.end_drag();
            }
            ("name", words) if !words.is_empty() => session.set_name(words.join(" ")),
            ("describe", words) => session.set_description(words.join(" ")),
            ("zoom", [direction]) => {
                let viewport = session.viewport_mut();
                let level = match *direction {
                    "in" => viewport.zoom_in(),
                    "out" => viewport.zoom_out(),
                    _ => viewport.reset(),
                };
                println!("Zoom: {}%", level);
            }
            ("check", _) => match session.check() {
                Ok(()) => println!("The process can be saved."),
                Err(e) => println!("{}", e),
            },
            ("save", _) => match session.save(store, identity) {
                Ok(process) => {
                    println!("Saved '{}' ({})", process.name, process.id);
                    break;
                }
                Err(e) => println!("Save failed: {}", e),
            },
            ("quit", _) | ("exit", _) => break,
            _ => println!("Unknown command. Type 'help' for a list of commands."),
        }
    }
}

fn add_step(session: &mut EditorSession, kind: NodeKind, pending: &mut Option<NodePayload>) {
    match session.choose_kind(kind) {
        Some(insertion) => {
            println!("Added {} ({})", insertion.node_id, insertion.rule);
            *pending = session
                .graph()
                .node(&insertion.node_id)
                .map(|n| n.payload.clone());
        }
        None => {
            session.dismiss_menu();
            println!("Could not add a {} step.", kind);
        }
    }
}

fn parse_step(text: &str) -> Option<NodeKind> {
    match text.parse::<NodeKind>() {
        Ok(kind) if !kind.is_anchor() => Some(kind),
        _ => {
            println!("Expected one of: api, email, text.");
            None
        }
    }
}

fn display_name(session: &EditorSession) -> &str {
    if session.name().is_empty() {
        "Untitled"
    } else {
        session.name()
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to write prompt: {}", e));
    }

    match io::stdin().read_line(&mut line) {
        Ok(0) => exit_with_error("Input closed"),
        Ok(_) => {}
        Err(e) => exit_with_error(&format!("Failed to read line: {}", e)),
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
