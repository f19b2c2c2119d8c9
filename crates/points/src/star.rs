// standard library
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::parsers::{self, data_block, key_value, label, number};

// tomokit modules
use tomokit_utils::f;

// external crates
use log::{debug, trace, warn};

/// Coordinate columns, as labelled in RELION STAR files
const COORDINATE_COLUMNS: [&str; 3] = ["rlnCoordinateX", "rlnCoordinateY", "rlnCoordinateZ"];

/// Particle positions read from a STAR file
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PositionList {
    /// Name of the data block the positions were read from
    pub block: String,
    /// Position coordinates, one `[x, y, z]` per row
    pub positions: Vec<[f64; 3]>,
}

impl PositionList {
    /// Number of positions
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if there are no positions
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterator over position coordinates
    pub fn iter(&self) -> std::slice::Iter<'_, [f64; 3]> {
        self.positions.iter()
    }
}

/// Read particle positions from a RELION STAR file
///
/// The first `loop_` table with all of the `_rlnCoordinateX`,
/// `_rlnCoordinateY`, and `_rlnCoordinateZ` columns is used, whichever data
/// block it is in. Other columns are ignored.
///
/// ```text
/// # version 30001
///
/// data_
///
/// loop_
/// _rlnCoordinateX #1
/// _rlnCoordinateY #2
/// _rlnCoordinateZ #3
///    101.2    96.0   44.5
///     87.9   112.3   40.1
/// ```
///
/// ```rust, no_run
/// # use tomokit_points::read_star_file;
/// let positions = read_star_file("./positions/Tomo0001_T1S1M12.star").unwrap();
/// for [x, y, z] in positions.iter() {
///     println!("{x} {y} {z}");
/// }
/// ```
pub fn read_star_file<P: AsRef<Path>>(path: P) -> Result<PositionList> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    debug!("Reading positions from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    let positions = parse_star(&text)?;

    if positions.is_empty() {
        warn!("Warning: {} contains no positions", path.display());
    }

    Ok(positions)
}

/// Parse particle positions from the text of a STAR file
///
/// See [read_star_file] for details.
pub fn parse_star(text: &str) -> Result<PositionList> {
    let tables = read_tables(text)?;

    let table = tables
        .iter()
        .find(|t| t.column(COORDINATE_COLUMNS[0]).is_some())
        .ok_or_else(|| Error::MissingColumn(f!("_{}", COORDINATE_COLUMNS[0])))?;

    let mut indices = [0; 3];
    for (index, name) in indices.iter_mut().zip(COORDINATE_COLUMNS) {
        *index = table
            .column(name)
            .ok_or_else(|| Error::MissingColumn(f!("_{name}")))?;
    }

    let positions = table
        .rows
        .iter()
        .map(|row| row.coordinates(&indices))
        .collect::<Result<Vec<[f64; 3]>>>()?;

    trace!("{} positions from data_{}", positions.len(), table.block);

    Ok(PositionList {
        block: table.block.clone(),
        positions,
    })
}

/// One `loop_` table
#[derive(Debug, Default)]
struct Table {
    block: String,
    /// Column labels with their 0-based column index
    labels: Vec<(String, usize)>,
    rows: Vec<Row>,
}

impl Table {
    fn new(block: &str) -> Self {
        Self {
            block: block.to_string(),
            ..Default::default()
        }
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.labels
            .iter()
            .find(|(label, _)| label == name)
            .map(|(_, index)| *index)
    }
}

/// Whitespace separated values of a table row
#[derive(Debug)]
struct Row {
    line: usize,
    values: Vec<String>,
}

impl Row {
    fn coordinates(&self, indices: &[usize; 3]) -> Result<[f64; 3]> {
        let mut coordinates = [0.0; 3];
        for (c, &index) in coordinates.iter_mut().zip(indices) {
            let text = &self.values[index];
            *c = number(text)
                .map(|(_, value)| value)
                .map_err(|_| Error::ParseError {
                    line: self.line,
                    reason: f!("\"{text}\" is not a number"),
                })?;
        }
        Ok(coordinates)
    }
}

#[derive(Debug, PartialEq)]
enum State {
    Block,
    Labels,
    Rows,
}

fn read_tables(text: &str) -> Result<Vec<Table>> {
    let mut tables: Vec<Table> = Vec::new();
    let mut block = String::new();
    let mut state = State::Block;

    for (i, line) in text.lines().enumerate() {
        let line_number = i + 1;

        if parsers::is_blank(line) || parsers::is_comment(line) {
            continue;
        }

        if let Ok((_, name)) = data_block(line) {
            block = name.trim().to_string();
            state = State::Block;
        } else if parsers::is_loop(line) {
            tables.push(Table::new(&block));
            state = State::Labels;
        } else if parsers::is_label(line) && state != State::Rows {
            if state == State::Block {
                let (_, (key, value)) = key_value(line).map_err(|_| Error::ParseError {
                    line: line_number,
                    reason: "expected a label and a value".to_string(),
                })?;
                trace!("Ignoring data_{block} entry {key} = {value}");
                continue;
            }

            let (_, (name, index)) = label(line).map_err(|_| Error::ParseError {
                line: line_number,
                reason: "invalid column label".to_string(),
            })?;

            let table = current(&mut tables, line_number)?;
            let index = match index {
                Some(0) => {
                    return Err(Error::ParseError {
                        line: line_number,
                        reason: "column indices start at 1".to_string(),
                    })
                }
                Some(n) => n - 1,
                None => table.labels.len(),
            };
            table.labels.push((name.to_string(), index));
        } else if parsers::is_label(line) {
            // a label after rows without a new loop_ ends the table
            let (_, (key, value)) = key_value(line).map_err(|_| Error::ParseError {
                line: line_number,
                reason: "expected a label and a value".to_string(),
            })?;
            trace!("Ignoring data_{block} entry {key} = {value}");
            state = State::Block;
        } else {
            if state == State::Block {
                return Err(Error::ParseError {
                    line: line_number,
                    reason: "values found outside of a loop_ table".to_string(),
                });
            }

            let table = current(&mut tables, line_number)?;
            let values: Vec<String> = line.split_whitespace().map(String::from).collect();
            if values.len() != table.labels.len() {
                return Err(Error::RaggedRow {
                    line: line_number,
                    expected: table.labels.len(),
                    found: values.len(),
                });
            }

            check_indices(table, line_number)?;
            table.rows.push(Row {
                line: line_number,
                values,
            });
            state = State::Rows;
        }
    }

    Ok(tables)
}

fn current(tables: &mut [Table], line: usize) -> Result<&mut Table> {
    tables.last_mut().ok_or_else(|| Error::ParseError {
        line,
        reason: "no loop_ table started".to_string(),
    })
}

/// Explicit `#n` indices must fall within the row
fn check_indices(table: &Table, line: usize) -> Result<()> {
    match table.labels.iter().find(|(_, i)| *i >= table.labels.len()) {
        Some((name, i)) => Err(Error::ParseError {
            line,
            reason: f!("column _{name} #{} is beyond the {} columns", i + 1, table.labels.len()),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "
# version 30001

data_

loop_
_rlnCoordinateX #1
_rlnCoordinateY #2
_rlnCoordinateZ #3
_rlnClassNumber #4
  101.2    96.0   44.5    1
   87.9   112.3   40.1    2
";

    #[test]
    fn example() {
        let list = parse_star(EXAMPLE).unwrap();
        assert_eq!(list.block, "");
        assert_eq!(list.positions, vec![[101.2, 96.0, 44.5], [87.9, 112.3, 40.1]]);
    }

    #[test]
    fn reordered_columns() {
        let text = "data_particles\nloop_\n_rlnAngleRot #1\n_rlnCoordinateZ #4\n_rlnCoordinateY #3\n_rlnCoordinateX #2\n0 1 2 3\n0 4 5 6\n";
        let list = parse_star(text).unwrap();
        assert_eq!(list.block, "particles");
        assert_eq!(list.positions, vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    fn without_indices() {
        let text = "data_\nloop_\n_rlnCoordinateX\n_rlnCoordinateY\n_rlnCoordinateZ\n1 2 3\n";
        assert_eq!(parse_star(text).unwrap().positions, vec![[1.0, 2.0, 3.0]]);
    }

    #[test]
    fn later_table() {
        let text = "data_optics\nloop_\n_rlnOpticsGroup #1\n1\n\ndata_particles\n_rlnVersion 3\nloop_\n_rlnCoordinateX #1\n_rlnCoordinateY #2\n_rlnCoordinateZ #3\n7 8 9\n";
        let list = parse_star(text).unwrap();
        assert_eq!(list.block, "particles");
        assert_eq!(list.positions, vec![[7.0, 8.0, 9.0]]);
    }

    #[test]
    fn missing_column() {
        let text = "data_\nloop_\n_rlnCoordinateX #1\n_rlnCoordinateY #2\n1 2\n";
        let result = parse_star(text);
        assert!(matches!(result, Err(Error::MissingColumn(c)) if c == "_rlnCoordinateZ"));

        let result = parse_star("data_\n");
        assert!(matches!(result, Err(Error::MissingColumn(c)) if c == "_rlnCoordinateX"));
    }

    #[test]
    fn ragged_row() {
        let text = "data_\nloop_\n_rlnCoordinateX #1\n_rlnCoordinateY #2\n_rlnCoordinateZ #3\n1 2 3\n4 5\n";
        let result = parse_star(text);
        assert!(matches!(
            result,
            Err(Error::RaggedRow {
                line: 7,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn bad_number() {
        let text = "data_\nloop_\n_rlnCoordinateX #1\n_rlnCoordinateY #2\n_rlnCoordinateZ #3\n1 two 3\n";
        let result = parse_star(text);
        assert!(matches!(result, Err(Error::ParseError { line: 6, .. })));
    }

    #[test]
    fn values_outside_table() {
        let result = parse_star("data_\n1 2 3\n");
        assert!(matches!(result, Err(Error::ParseError { line: 2, .. })));
    }

    #[test]
    fn index_beyond_columns() {
        let text = "data_\nloop_\n_rlnCoordinateX #1\n_rlnCoordinateY #2\n_rlnCoordinateZ #9\n1 2 3\n";
        let result = parse_star(text);
        assert!(matches!(result, Err(Error::ParseError { line: 6, .. })));
    }

    #[test]
    fn empty_table() {
        let text = "data_\nloop_\n_rlnCoordinateX #1\n_rlnCoordinateY #2\n_rlnCoordinateZ #3\n";
        assert!(parse_star(text).unwrap().is_empty());
    }
}
