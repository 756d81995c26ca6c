use std::collections::HashMap;

use anyhow::Context;
use colored::Colorize;

use mog_engine::{MotherEngine, NodeId, NodeView, TreeView};
use mog_server::{MogServer, ServerConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    match cli.command {
        Command::Serve(args) => cmd_serve(config, args),
        Command::Tree(args) => cmd_tree(&open_engine(&config)?, args, cli.format),
        Command::Check => cmd_check(&open_engine(&config)?, cli.format),
        Command::Descendants(args) => cmd_descendants(&open_engine(&config)?, args, cli.format),
        Command::Stats => cmd_stats(&open_engine(&config)?, cli.format),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(corpus) = &cli.corpus {
        config.corpus_path = corpus.clone();
    }
    tracing::debug!(corpus = %config.corpus_path.display(), "configuration loaded");
    Ok(config)
}

fn open_engine(config: &ServerConfig) -> anyhow::Result<MotherEngine> {
    MotherEngine::open(&config.corpus_path, config.engine.clone())
        .with_context(|| format!("loading corpus {}", config.corpus_path.display()))
}

fn cmd_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    let server = MogServer::from_config(config)?;
    println!(
        "MOG server on {} ({} nodes)",
        server.config().bind_addr.to_string().bold(),
        server.engine().corpus().len()
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_tree(engine: &MotherEngine, args: TreeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let view = engine.get_tree(args.scope.as_deref(), args.context)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => {
            let scope = view.scope.as_deref().unwrap_or("(default)");
            println!("Scope {}: {} nodes", scope.yellow().bold(), view.nodes.len());
            for line in render_tree(&view) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn cmd_check(engine: &MotherEngine, format: OutputFormat) -> anyhow::Result<()> {
    engine.verify()?;
    let stats = engine.stats()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({"ok": true, "stats": stats})),
        OutputFormat::Text => {
            println!("{} Base forest is acyclic", "✓".green().bold());
            println!("  Nodes: {}", stats.nodes.to_string().bold());
            println!("  Roots: {}", stats.roots);
            println!("  Containers: {}", stats.containers);
        }
    }
    Ok(())
}

fn cmd_descendants(
    engine: &MotherEngine,
    args: DescendantsArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let node = NodeId::new(args.id);
    let descendants = engine.descendants_of(node)?;
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({"node": node, "descendants": descendants})
        ),
        OutputFormat::Text => {
            println!("{} descendants of {}", descendants.len(), node.to_string().yellow());
            for id in descendants {
                println!("  {id}");
            }
        }
    }
    Ok(())
}

fn cmd_stats(engine: &MotherEngine, format: OutputFormat) -> anyhow::Result<()> {
    let stats = engine.stats()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            println!("Nodes:      {}", stats.nodes.to_string().bold());
            println!("Books:      {}", stats.books);
            println!("Containers: {}", stats.containers);
            println!("Roots:      {}", stats.roots);
            println!("Overlay:    {} entries", stats.overlay_entries);
            println!("Version:    {}", stats.version.to_string().cyan());
        }
    }
    Ok(())
}

/// Indented lines, one per node. Nodes whose mother is outside the view
/// start a new top-level branch.
fn render_tree(view: &TreeView) -> Vec<String> {
    let by_id: HashMap<NodeId, &NodeView> = view.nodes.iter().map(|n| (n.id, n)).collect();
    let mut lines = Vec::with_capacity(view.nodes.len());
    let mut stack = Vec::new();
    for (node, edge) in view.nodes.iter().zip(&view.edges) {
        let mother_in_view = edge.to.is_some_and(|m| by_id.contains_key(&m));
        if mother_in_view {
            continue;
        }
        stack.push((node, 0));
        while let Some((node, depth)) = stack.pop() {
            lines.push(render_line(node, depth));
            // Reversed so the first child is printed first.
            for child in node.children.iter().rev() {
                if let Some(child) = by_id.get(&child.id) {
                    stack.push((child, depth + 1));
                }
            }
        }
    }
    lines
}

fn render_line(node: &NodeView, depth: usize) -> String {
    let marker = if node.in_scope { "" } else { " (context)" };
    let label = if node.label.is_empty() { &node.reference } else { &node.label };
    format!("{}{} {} [{}]{}", "  ".repeat(depth), node.id, label, node.kind, marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mog_engine::{CorpusRecord, EngineConfig, InMemoryCorpus};

    fn engine() -> MotherEngine {
        let records = vec![
            CorpusRecord::clause(1, "Genesis", 1, 1, None),
            CorpusRecord::clause(2, "Genesis", 1, 1, Some(1)),
            CorpusRecord::clause(3, "Genesis", 1, 1, Some(2)),
            CorpusRecord::clause(4, "Genesis", 1, 2, None),
        ];
        MotherEngine::new(
            InMemoryCorpus::from_records(records).unwrap(),
            EngineConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn tree_is_indented_by_effective_depth() {
        let view = engine().get_tree(None, false).unwrap();
        let lines = render_tree(&view);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("1 "));
        assert!(lines[1].starts_with("  2 "));
        assert!(lines[2].starts_with("    3 "));
        assert!(lines[3].starts_with("4 "));
    }

    #[test]
    fn deep_chain_renders_without_recursion() {
        let depth = 5_000u64;
        let records = (1..=depth)
            .map(|id| CorpusRecord::clause(id, "Genesis", 1, 1, (id > 1).then(|| id - 1)))
            .collect();
        let engine = MotherEngine::new(
            InMemoryCorpus::from_records(records).unwrap(),
            EngineConfig::default(),
        )
        .unwrap();
        let lines = render_tree(&engine.get_tree(Some("Genesis.1.1"), false).unwrap());
        assert_eq!(lines.len(), depth as usize);
        let last = lines.last().unwrap();
        assert!(last.starts_with(&format!("{}{depth} ", "  ".repeat(depth as usize - 1))));
    }

    #[test]
    fn scoped_tree_starts_at_nodes_with_mothers_outside() {
        let engine = engine();
        let view = engine.get_tree(Some("Genesis.1.1"), false).unwrap();
        engine.rootify(NodeId::new(2)).unwrap();
        let after = engine.get_tree(Some("Genesis.1.1"), false).unwrap();
        assert_eq!(render_tree(&view).len(), 3);
        let lines = render_tree(&after);
        assert!(lines[1].starts_with("2 "));
        assert!(lines[2].starts_with("  3 "));
    }

    #[test]
    fn config_file_and_corpus_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mog.toml");
        std::fs::write(&path, "corpus_path = \"from-file.json\"\n").unwrap();

        let cli = <Cli as clap::Parser>::try_parse_from([
            "mog",
            "stats",
            "--config",
            path.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(
            load_config(&cli).unwrap().corpus_path,
            std::path::PathBuf::from("from-file.json")
        );

        let cli = <Cli as clap::Parser>::try_parse_from([
            "mog",
            "stats",
            "--config",
            path.to_str().unwrap(),
            "--corpus",
            "cli.json",
        ])
        .unwrap();
        assert_eq!(load_config(&cli).unwrap().corpus_path, std::path::PathBuf::from("cli.json"));
    }
}
