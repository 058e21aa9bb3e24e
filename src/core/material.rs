//! Material node tree.
//!
//! Nodes live in an arena and refer to each other by `NodeId`. Each node
//! owns its child list and keeps a non-owning back-reference to its parent.
//! Duplicate LEVEL nodes are dropped before they are linked, so the tree
//! never holds a node that is later detached.

use std::path::Path;

use tracing::{debug, instrument, trace};

use crate::core::book::{BookContainer, ReadOptions};
use crate::core::cell::{CellValue, Row};
use crate::core::classify::{RowKind, classify};
use crate::core::emit;
use crate::core::error::ConvertError;
use crate::core::format::{self, block_name_fragments, block_quantity};
use crate::infra::xlsx::read_books;

/// Index of a node inside its `MaterialTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Tagged node variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Level(u8),
    Block,
    Detail,
    Paint,
}

impl NodeKind {
    /// 0 for the root, 1..=8 otherwise
    pub fn level(self) -> u8 {
        match self {
            NodeKind::Root => 0,
            NodeKind::Level(n) => n,
            NodeKind::Block => 6,
            NodeKind::Detail => 7,
            NodeKind::Paint => 8,
        }
    }

    /// Row kind for formatting; `None` for the root
    pub fn row_kind(self) -> Option<RowKind> {
        match self {
            NodeKind::Root => None,
            NodeKind::Level(n) => Some(RowKind::Level(n)),
            NodeKind::Block => Some(RowKind::Block),
            NodeKind::Detail => Some(RowKind::Detail),
            NodeKind::Paint => Some(RowKind::Paint),
        }
    }
}

impl From<RowKind> for NodeKind {
    fn from(kind: RowKind) -> Self {
        match kind {
            RowKind::Level(n) => NodeKind::Level(n),
            RowKind::Block => NodeKind::Block,
            RowKind::Detail => NodeKind::Detail,
            RowKind::Paint => NodeKind::Paint,
        }
    }
}

/// One node: its kind, raw row, parent link and ordered children
#[derive(Debug, Clone)]
pub struct MaterialNode {
    kind: NodeKind,
    row: Row,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl MaterialNode {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn level(&self) -> u8 {
        self.kind.level()
    }

    pub fn row(&self) -> &[CellValue] {
        &self.row
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.kind == NodeKind::Root
    }

    /// Display name:
    /// - LEVEL: column 1
    /// - BLOCK: present fragments of columns 1..=3 joined by a space
    /// - DETAIL: drawing label
    /// - PAINT: column 0
    pub fn name(&self) -> String {
        match self.kind {
            NodeKind::Root => String::new(),
            NodeKind::Level(_) => self.cell(1).to_text(),
            NodeKind::Block => block_name_fragments(&self.row).join(" "),
            NodeKind::Detail => self.drawing_label(false),
            NodeKind::Paint => self.cell(0).to_text(),
        }
    }

    /// `#1`..`#5`, `BLOCK`, `DETAIL`, `PAINT`; empty for the root
    pub fn level_label(&self) -> String {
        self.kind.row_kind().map(RowKind::label).unwrap_or_default()
    }

    /// Level label and name for LEVEL nodes, the name alone otherwise
    pub fn name_with_level(&self) -> String {
        match self.kind {
            NodeKind::Level(_) => format!("{} {}", self.level_label(), self.name()),
            _ => self.name(),
        }
    }

    /// Quantity of this node: aggregated for BLOCK, column 6 otherwise
    pub fn each(&self) -> Result<CellValue, ConvertError> {
        match self.kind {
            NodeKind::Block => block_quantity(&self.row),
            _ => Ok(self.cell(6).clone()),
        }
    }

    /// Short description of a DETAIL row as written on drawings,
    /// e.g. `2 - PL 220 x 16 x 2200 (SM490YA)`.
    pub fn drawing_label(&self, compact: bool) -> String {
        let [mark, s1, s2, l, each, quality] =
            [0, 1, 2, 5, 6, 9].map(|i| self.cell(i).to_text());

        let mut line = format!("{each} - {mark}");

        match mark.as_str() {
            "PL" => line.push_str(&format!(" {s1} x {s2} x {l} ({quality})")),
            "TCB" | "HTB" | "BN" | "BN2" | "BOLT" => {
                line.push_str(&format!(" M{s1} x {l} ({quality})"))
            }
            _ => {}
        }

        if compact { line.replace(' ', "") } else { line }
    }

    /// Fixed-width line for this node; the root has none.
    pub fn format_line(&self) -> Result<Option<String>, ConvertError> {
        match self.kind.row_kind() {
            Some(kind) => format::format_line(kind, &self.row).map(Some),
            None => Ok(None),
        }
    }

    fn cell(&self, i: usize) -> &CellValue {
        const ABSENT: &CellValue = &CellValue::Absent;
        self.row.get(i).unwrap_or(ABSENT)
    }
}

/// Arena-backed rooted tree of material nodes
#[derive(Debug, Clone)]
pub struct MaterialTree {
    nodes: Vec<MaterialNode>,
}

impl Default for MaterialTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialTree {
    /// A tree holding only the root
    pub fn new() -> Self {
        let root = MaterialNode {
            kind: NodeKind::Root,
            row: Row::new(),
            parent: None,
            children: Vec::new(),
        };
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &MaterialNode {
        &self.nodes[id.0]
    }

    /// Number of nodes excluding the root
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.node(self.root()).children.is_empty()
    }

    /// Names from the first non-root ancestor down to `id`
    pub fn hierarchy_names(&self, id: NodeId) -> Vec<String> {
        let mut names = Vec::new();
        let mut cur = Some(id);

        while let Some(n) = cur {
            let node = self.node(n);
            if node.is_root() {
                break;
            }
            names.push(node.name());
            cur = node.parent;
        }

        names.reverse();
        names
    }

    /// Pre-order descendants of the root (root excluded)
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> =
            self.node(self.root()).children.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }

        out
    }

    /// Hierarchy names of `parent`'s path plus `name`, without linking anything
    fn path_with(&self, parent: NodeId, name: String) -> Vec<String> {
        let mut names = self.hierarchy_names(parent);
        names.push(name);
        names
    }

    fn push_child(&mut self, parent: NodeId, node: MaterialNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Build the tree from a row stream.
    ///
    /// Each classified row attaches to the most recently created node one
    /// level above it. A LEVEL row whose full name path equals a sibling's is
    /// dropped and does not become a parent candidate.
    #[instrument(skip_all)]
    pub fn build<'a, I>(rows: I) -> Result<Self, ConvertError>
    where
        I: IntoIterator<Item = &'a Row>,
    {
        let mut tree = Self::new();

        // Most recent node per level; slot 0 is the root
        let mut latest: [Option<NodeId>; 9] = [None; 9];
        latest[0] = Some(tree.root());

        for (index, row) in rows.into_iter().enumerate() {
            let Some(kind) = classify(row) else {
                continue;
            };
            let level = kind.depth();

            let parent = latest[usize::from(level - 1)]
                .ok_or(ConvertError::MissingParent { level, index })?;

            let node = MaterialNode {
                kind: kind.into(),
                row: row.clone(),
                parent: Some(parent),
                children: Vec::new(),
            };

            if let NodeKind::Level(_) = node.kind {
                let path = tree.path_with(parent, node.name());
                let duplicate = tree
                    .node(parent)
                    .children
                    .iter()
                    .any(|&sibling| tree.hierarchy_names(sibling) == path);

                if duplicate {
                    debug!(?path, index, "duplicate level row dropped");
                    continue;
                }
            }

            let id = tree.push_child(parent, node);
            trace!(index, level, "node attached");
            latest[usize::from(level)] = Some(id);
        }

        debug!(nodes = tree.len(), "material tree built");
        Ok(tree)
    }
}

/// Books, rows and the tree built from them
#[derive(Debug, Clone)]
pub struct Material {
    container: BookContainer,
    tree: MaterialTree,
}

impl Material {
    /// Build one tree from the rows of every book, in file-then-sheet order.
    pub fn from_container(container: BookContainer) -> Result<Self, ConvertError> {
        let tree = MaterialTree::build(container.rows())?;
        Ok(Self { container, tree })
    }

    /// Read workbooks in order and build their combined tree.
    pub fn from_files<P: AsRef<Path>>(
        files: &[P],
        options: ReadOptions,
    ) -> Result<Self, ConvertError> {
        Self::from_container(read_books(files, options, |_| {})?)
    }

    /// Tree from in-memory rows, without any book
    pub fn from_rows(rows: &[Row]) -> Result<Self, ConvertError> {
        let tree = MaterialTree::build(rows)?;
        Ok(Self { container: BookContainer::default(), tree })
    }

    pub fn tree(&self) -> &MaterialTree {
        &self.tree
    }

    pub fn container(&self) -> &BookContainer {
        &self.container
    }

    pub fn nodes(&self) -> Vec<&MaterialNode> {
        self.tree.descendants().into_iter().map(|id| self.tree.node(id)).collect()
    }

    /// File stems of the books, in argument order
    pub fn book_names(&self) -> Vec<String> {
        self.container.books().iter().map(|b| b.name()).collect()
    }

    pub fn filepaths(&self) -> Vec<&Path> {
        self.container.filepaths()
    }

    /// Header block plus one line per node
    pub fn format_lines(&self) -> Result<Vec<String>, ConvertError> {
        emit::emit(&self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    const NONE: Option<&str> = None;

    fn sample() -> Vec<Row> {
        vec![
            row!["#1", "サンプル橋", NONE, NONE, NONE, NONE, 1],
            row!["#2", "上部構造", NONE, NONE, NONE, NONE, 1],
            row!["#3", "主構造", NONE, NONE, NONE, NONE, 1],
            row!["#4", "横桁", NONE, NONE, NONE, NONE, 1],
            row!["#5", "中間横桁", NONE, NONE, NONE, NONE, 1],
            row![NONE, "中間横桁", "本体", NONE, NONE, NONE, 6, 1],
            row!["PL", 220, 16, NONE, NONE, 2200, 2, NONE, NONE, "SM490YA"],
            row!["*=", NONE, NONE],
            row![NONE, NONE, NONE],
            row!["HTB", 22, NONE, NONE, NONE, 75, 8, NONE, NONE, "S10T"],
        ]
    }

    #[test]
    fn builds_parent_chain_by_level() {
        let m = Material::from_rows(&sample()).unwrap();
        let nodes = m.nodes();

        let levels: Vec<u8> = nodes.iter().map(|n| n.level()).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5, 6, 7, 8, 7]);

        let tree = m.tree();
        for id in tree.descendants() {
            let node = tree.node(id);
            let parent = tree.node(node.parent().unwrap());
            match node.kind() {
                NodeKind::Level(1) => assert!(parent.is_root()),
                NodeKind::Level(n) => assert_eq!(parent.level(), n - 1),
                NodeKind::Block => assert_eq!(parent.kind(), NodeKind::Level(5)),
                NodeKind::Detail => assert_eq!(parent.kind(), NodeKind::Block),
                NodeKind::Paint => assert_eq!(parent.kind(), NodeKind::Detail),
                NodeKind::Root => unreachable!(),
            }
        }
    }

    #[test]
    fn duplicate_level_paths_are_dropped() {
        let rows = vec![
            row!["#1", "橋"],
            row!["#2", "上部構造"],
            row!["#2", "下部構造"],
            row!["#2", "上部構造"],
            row!["#3", "主構造"],
        ];
        let m = Material::from_rows(&rows).unwrap();
        let names: Vec<String> = m.nodes().iter().map(|n| n.name_with_level()).collect();

        assert_eq!(names, vec!["#1 橋", "#2 上部構造", "#2 下部構造", "#3 主構造"]);

        // The dropped row is not a parent candidate: #3 attaches to 下部構造
        let tree = m.tree();
        let last = *tree.descendants().last().unwrap();
        assert_eq!(tree.hierarchy_names(last), vec!["橋", "下部構造", "主構造"]);
    }

    #[test]
    fn same_name_under_different_parents_is_kept() {
        let rows = vec![
            row!["#1", "橋"],
            row!["#2", "A"],
            row!["#3", "横桁"],
            row!["#2", "B"],
            row!["#3", "横桁"],
        ];
        let m = Material::from_rows(&rows).unwrap();
        assert_eq!(m.tree().len(), 5);
    }

    #[test]
    fn missing_parent_fails_fast() {
        let rows = vec![row!["#1", "橋"], row!["#3", "主構造"]];
        let err = Material::from_rows(&rows).unwrap_err();
        assert!(matches!(err, ConvertError::MissingParent { level: 3, index: 1 }));

        let rows = vec![row!["PL", 220, 16]];
        let err = Material::from_rows(&rows).unwrap_err();
        assert!(matches!(err, ConvertError::MissingParent { level: 7, index: 0 }));
    }

    #[test]
    fn level_drop_attaches_to_latest_holder() {
        let rows = vec![
            row!["#1", "橋"],
            row!["#2", "上部"],
            row!["#3", "主構"],
            row!["#1", "別橋"],
            row!["#3", "続き"],
        ];
        let m = Material::from_rows(&rows).unwrap();
        let tree = m.tree();
        let paths: Vec<Vec<String>> =
            tree.descendants().into_iter().map(|id| tree.hierarchy_names(id)).collect();

        assert_eq!(
            paths,
            vec![
                vec!["橋"],
                vec!["橋", "上部"],
                vec!["橋", "上部", "主構"],
                vec!["橋", "上部", "続き"],
                vec!["別橋"],
            ]
        );
    }

    #[test]
    fn node_names_and_labels() {
        let m = Material::from_rows(&sample()).unwrap();
        let nodes = m.nodes();

        assert_eq!(nodes[5].name(), "中間横桁 本体");
        assert_eq!(nodes[5].level_label(), "BLOCK");
        assert_eq!(nodes[5].each().unwrap(), CellValue::Int(6));
        assert_eq!(nodes[6].name(), "2 - PL 220 x 16 x 2200 (SM490YA)");
        assert_eq!(nodes[6].drawing_label(true), "2-PL220x16x2200(SM490YA)");
        assert_eq!(nodes[7].name(), "*=");
        assert_eq!(nodes[8].name(), "8 - HTB M22 x 75 (S10T)");
        assert_eq!(nodes[0].name_with_level(), "#1 サンプル橋");
    }

    #[test]
    fn blank_rows_are_skipped() {
        let rows = vec![row!["#1", "橋"], row![], row![NONE, NONE, NONE], row!["#2", "上部"]];
        let m = Material::from_rows(&rows).unwrap();
        assert_eq!(m.tree().len(), 2);
    }
}
