/*!
# Graph File I/O

Reads and writes the plain-ASCII, whitespace-separated graph file format:

```text
<V> <E>
<from_0> <to_0> <weight_0>
<from_1> <to_1> <weight_1>
...
```

`V` and `E` are decimal integers on the first line; each of the following
`E` lines holds one `(from, to, weight)` edge triple. This is the format
both the maze generator ([`crate::core::maze`]) writes and every MST kernel
reads, on rank 0 only.
*/

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::core::error::MstError;
use crate::core::types::{Edge, VertexId, WeightedGraph};

/// Reads a [`WeightedGraph`] from `path` in the format above.
///
/// Returns [`MstError::MalformedGraphFile`] if the header is missing or
/// non-numeric, if a tail line does not parse as three integers, if the
/// declared edge count `E` does not match the number of tail lines present,
/// or if any edge references a vertex id outside `[0, V)`.
pub fn read_graph_file(path: impl AsRef<Path>) -> Result<WeightedGraph, MstError> {
    let file = File::open(path)?;
    let mut lines = BufReader::new(file).lines();

    let header = lines
        .next()
        .ok_or_else(|| MstError::malformed_graph_file("missing header line"))??;
    let mut header_tokens = header.split_whitespace();
    let vertex_count: usize = header_tokens
        .next()
        .ok_or_else(|| MstError::malformed_graph_file("missing vertex count"))?
        .parse()?;
    let edge_count: usize = header_tokens
        .next()
        .ok_or_else(|| MstError::malformed_graph_file("missing edge count"))?
        .parse()?;

    let mut graph = WeightedGraph::new(vertex_count);
    let mut lines_read = 0usize;

    for line in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let from: usize = tokens
            .next()
            .ok_or_else(|| MstError::malformed_graph_file("edge line missing 'from'"))?
            .parse()?;
        let to: usize = tokens
            .next()
            .ok_or_else(|| MstError::malformed_graph_file("edge line missing 'to'"))?
            .parse()?;
        let weight: i32 = tokens
            .next()
            .ok_or_else(|| MstError::malformed_graph_file("edge line missing 'weight'"))?
            .parse()?;

        if from >= vertex_count {
            return Err(MstError::InvalidVertexId { vertex: from, vertex_count });
        }
        if to >= vertex_count {
            return Err(MstError::InvalidVertexId { vertex: to, vertex_count });
        }

        graph.push_edge(VertexId::from(from), VertexId::from(to), weight);
        lines_read += 1;
    }

    if lines_read != edge_count {
        return Err(MstError::malformed_graph_file(format!(
            "header declared {edge_count} edges but {lines_read} edge lines were present"
        )));
    }

    Ok(graph)
}

/// Writes `graph` to `path` in the format [`read_graph_file`] reads.
pub fn write_graph_file(path: impl AsRef<Path>, graph: &WeightedGraph) -> Result<(), MstError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{} {}", graph.vertex_count(), graph.edge_count())?;
    for Edge { from, to, weight } in graph.edges() {
        writeln!(writer, "{} {} {}", from.index(), to.index(), weight)?;
    }
    writer.flush()?;
    Ok(())
}
