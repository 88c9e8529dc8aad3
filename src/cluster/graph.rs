//! Directed neighbor relation read from a persisted FCC matrix.
//!
//! Elements live in an arena and are addressed by their position in it;
//! neighbor lists hold arena indices, never references.

use ahash::{AHashMap, AHashSet};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{PairScore, StructureId};

/// One clusterable structure.
#[derive(Debug, Clone)]
pub struct Element {
    pub id: StructureId,
    /// Arena indices of the structures this one points to, in matrix order
    pub neighbors: Vec<usize>,
    /// Number of elements pointing at this one
    pub incoming: usize,
}

impl Element {
    fn new(id: StructureId) -> Self {
        Self { id, neighbors: Vec::new(), incoming: 0 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NeighborGraph {
    elements: Vec<Element>,
    index: AHashMap<StructureId, usize>,
}

impl NeighborGraph {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, idx: usize) -> &Element {
        &self.elements[idx]
    }

    pub fn id(&self, idx: usize) -> StructureId {
        self.elements[idx].id
    }

    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.elements[idx].neighbors
    }

    pub fn index_of(&self, id: StructureId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// No neighbor in either direction: can never join a cluster.
    pub fn is_true_singleton(&self, idx: usize) -> bool {
        let element = &self.elements[idx];
        element.neighbors.is_empty() && element.incoming == 0
    }

    pub fn edge_count(&self) -> usize {
        self.elements.iter().map(|e| e.neighbors.len()).sum()
    }

    /// Reads a 4-column matrix file and applies `cutoff`.
    pub fn from_path<P: AsRef<Path>>(path: P, cutoff: f64) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
        })?;
        let graph = Self::from_reader(BufReader::new(file), cutoff)?;
        info!("Read {}x{} distance matrix from {:?}", graph.len(), graph.len(), path);
        Ok(graph)
    }

    pub fn from_reader<R: BufRead>(reader: R, cutoff: f64) -> Result<Self> {
        let mut builder = GraphBuilder::new(cutoff);
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let pair = parse_matrix_row(&line, line_num + 1)?;
            builder.add_pair(&pair);
        }
        Ok(builder.build())
    }

    /// Builds the graph straight from computed scores, skipping the file.
    pub fn from_pairs<I: IntoIterator<Item = PairScore>>(pairs: I, cutoff: f64) -> Self {
        let mut builder = GraphBuilder::new(cutoff);
        for pair in pairs {
            builder.add_pair(&pair);
        }
        builder.build()
    }
}

/// Parses `<i> <k> <score_ik> <score_ki>`.
pub fn parse_matrix_row(line: &str, line_num: usize) -> Result<PairScore> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(Error::matrix_parse(
            line_num,
            format!("expected 4 columns, found {}", fields.len()),
        ));
    }

    let id = |s: &str| {
        s.parse::<StructureId>()
            .map_err(|e| Error::matrix_parse(line_num, format!("bad structure index {:?}: {}", s, e)))
    };
    let score = |s: &str| {
        s.parse::<f64>()
            .map_err(|e| Error::matrix_parse(line_num, format!("bad score {:?}: {}", s, e)))
    };

    Ok(PairScore::new(id(fields[0])?, id(fields[1])?, score(fields[2])?, score(fields[3])?))
}

/// Accumulates directed edges; elements are created on first reference.
pub struct GraphBuilder {
    cutoff: f64,
    graph: NeighborGraph,
}

impl GraphBuilder {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff, graph: NeighborGraph::default() }
    }

    fn element_index(&mut self, id: StructureId) -> usize {
        if let Some(&idx) = self.graph.index.get(&id) {
            return idx;
        }
        let idx = self.graph.elements.len();
        self.graph.elements.push(Element::new(id));
        self.graph.index.insert(id, idx);
        idx
    }

    pub fn add_pair(&mut self, pair: &PairScore) {
        let i = self.element_index(pair.i);
        let k = self.element_index(pair.k);

        if i == k {
            debug!("Ignoring self pair for structure {}", pair.i);
            return;
        }

        // strictly greater: a score equal to the cutoff is not a neighbor
        if pair.score_ik > self.cutoff {
            self.graph.elements[i].neighbors.push(k);
        }
        if pair.score_ki > self.cutoff {
            self.graph.elements[k].neighbors.push(i);
        }
    }

    /// Drops repeated edges (first occurrence wins) and counts in-degrees.
    pub fn build(mut self) -> NeighborGraph {
        let mut seen = AHashSet::new();
        let mut incoming = vec![0usize; self.graph.elements.len()];

        for element in &mut self.graph.elements {
            seen.clear();
            element.neighbors.retain(|&n| seen.insert(n));
            for &n in &element.neighbors {
                incoming[n] += 1;
            }
        }
        for (element, count) in self.graph.elements.iter_mut().zip(incoming) {
            element.incoming = count;
        }

        debug!(
            "Neighbor graph: {} elements, {} directed edges above cutoff {}",
            self.graph.len(),
            self.graph.edge_count(),
            self.cutoff
        );
        self.graph
    }
}
