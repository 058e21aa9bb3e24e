//! `matecon tree`: books with their recognized sheets, followed by the
//! material hierarchy built from them.
//!
//! Labels are colored by level unless `--no-color` is set. DETAIL nodes use
//! their drawing label and PAINT nodes their marker.

use anyhow::{Context, Result};
use itertools::Itertools;
use owo_colors::OwoColorize;
use ptree::TreeBuilder;
use ptree::item::StringItem;
use tracing::warn;

use crate::cli::{AppContext, TreeArgs};
use crate::core::book::BookContainer;
use crate::core::convert::read_with_progress;
use crate::core::material::{MaterialNode, MaterialTree, NodeId, NodeKind};
use crate::infra::config::{Config, load_config};
use crate::infra::io::ExcelFileSet;

pub fn run(args: TreeArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config().unwrap_or_else(|err| {
        warn!(%err, "configuration ignored");
        Config::default()
    });

    let files = ExcelFileSet::from_args(&args.files)?;
    let options = config.read_options(args.include_hidden, args.strict);

    if ctx.dry_run {
        if !ctx.quiet {
            println!("{}", "DRY RUN: Would read:".yellow());
            println!("  Files: {}", files.paths().iter().map(|p| p.display()).join(", "));
            println!("  Options: {:?}", options);
        }
        return Ok(());
    }

    let container = read_with_progress(&files, options, ctx)?;
    let tree = MaterialTree::build(container.rows()).context("Failed to build material tree")?;

    if !ctx.quiet {
        let color = !ctx.no_color;
        ptree::print_tree(&books_tree(&container, color))?;
        ptree::print_tree(&material_tree(&tree, color))?;
    }

    Ok(())
}

/// `books` → book file names → `sheet (N rows @ (r, c))`
fn books_tree(container: &BookContainer, color: bool) -> StringItem {
    let mut builder = TreeBuilder::new("books".to_string());

    for book in container.books() {
        let file_name = book
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| book.name());
        let label = if color { file_name.blue().to_string() } else { file_name };

        builder.begin_child(label);
        for sheet in book.sheets() {
            builder.add_empty_child(format!(
                "{} ({} rows @ {})",
                sheet.name(),
                sheet.len(),
                sheet.header_position()
            ));
        }
        builder.end_child();
    }

    builder.build()
}

fn material_tree(tree: &MaterialTree, color: bool) -> StringItem {
    let mut builder = TreeBuilder::new("material".to_string());

    for &child in tree.node(tree.root()).children() {
        add_node(&mut builder, tree, child, color);
    }

    builder.build()
}

fn add_node(builder: &mut TreeBuilder, tree: &MaterialTree, id: NodeId, color: bool) {
    let node = tree.node(id);
    let label = node_label(node, color);

    if node.children().is_empty() {
        builder.add_empty_child(label);
        return;
    }

    builder.begin_child(label);
    for &child in node.children() {
        add_node(builder, tree, child, color);
    }
    builder.end_child();
}

fn node_label(node: &MaterialNode, color: bool) -> String {
    let label = match node.kind() {
        NodeKind::Block => match node.each() {
            Ok(each) => format!("{} x{}", node.name(), each),
            Err(_) => node.name(),
        },
        _ => node.name_with_level(),
    };

    if !color {
        return label;
    }

    match node.kind() {
        NodeKind::Root => label,
        NodeKind::Level(1) => label.bold().to_string(),
        NodeKind::Level(_) => label.cyan().to_string(),
        NodeKind::Block => label.yellow().to_string(),
        NodeKind::Detail => label.to_string(),
        NodeKind::Paint => label.magenta().to_string(),
    }
}
