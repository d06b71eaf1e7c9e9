use super::emitter::CONSTANT_NAME;
use crate::core::config::RomConfig;
use crate::core::memory::{RomContents, RomError};
use crate::core::types::{EntityPort, PortDirection, RomGeometry, DATA_PORT};
use log::debug;
use std::path::Path;

/// Architecture body found in a VHDL file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchitectureDecl {
    pub name: String,
    pub entity: String,
}

/// What a generated ROM file declares
///
/// This is a line-oriented reader for the layout produced by the emitter,
/// not a general VHDL parser.
#[derive(Debug, Clone, Default)]
pub struct RomReport {
    pub entities: Vec<String>,
    pub ports: Vec<EntityPort>,
    pub architectures: Vec<ArchitectureDecl>,
    pub values: Vec<u32>,
    /// Number of concurrent assignments targeting the data output
    pub data_drivers: usize,
}

#[derive(PartialEq)]
enum Section {
    Top,
    Ports,
    Cells,
}

/// Read a generated ROM description from text
pub fn inspect_rom(text: &str) -> Result<RomReport, RomError> {
    let mut report = RomReport::default();
    let mut section = Section::Top;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        match section {
            Section::Ports => {
                if line.starts_with(')') {
                    section = Section::Top;
                } else {
                    report.ports.push(parse_port(line, line_no)?);
                }
            }
            Section::Cells => {
                let (cells, closed) = match line.find(')') {
                    Some(pos) => (&line[..pos], true),
                    None => (line, false),
                };
                parse_cells(cells, line_no, &mut report.values)?;
                if closed {
                    section = Section::Top;
                }
            }
            Section::Top => {
                let lower = line.to_ascii_lowercase();
                let words: Vec<&str> = line.split_whitespace().collect();

                if lower.starts_with("entity ") && lower.ends_with(" is") && words.len() == 3 {
                    report.entities.push(words[1].to_string());
                } else if lower.starts_with("port") && line.ends_with('(') {
                    section = Section::Ports;
                } else if lower.starts_with("architecture ") && words.len() == 5 {
                    report.architectures.push(ArchitectureDecl {
                        name: words[1].to_string(),
                        entity: words[3].to_string(),
                    });
                } else if lower.starts_with("constant") && line.contains(CONSTANT_NAME) {
                    let Some(pos) = line.find(":= (") else {
                        return Err(RomError::Parse(format!(
                            "line {}: constant without aggregate initializer",
                            line_no
                        )));
                    };
                    let rest = &line[pos + 4..];
                    match rest.find(')') {
                        Some(end) => parse_cells(&rest[..end], line_no, &mut report.values)?,
                        None => {
                            parse_cells(rest, line_no, &mut report.values)?;
                            section = Section::Cells;
                        }
                    }
                } else if words.first() == Some(&DATA_PORT) && words.get(1) == Some(&"<=") {
                    report.data_drivers += 1;
                }
            }
        }
    }

    if section != Section::Top {
        return Err(RomError::Parse("unexpected end of file inside a declaration".to_string()));
    }

    debug!(
        "Inspected {} entities, {} ports, {} cells",
        report.entities.len(),
        report.ports.len(),
        report.values.len()
    );
    Ok(report)
}

/// Read a generated ROM description from a file
pub fn inspect_rom_file(path: &Path) -> Result<RomReport, RomError> {
    let text = std::fs::read_to_string(path).map_err(|e| RomError::io(path, e))?;
    inspect_rom(&text)
}

impl RomReport {
    /// Geometry implied by the address and data port widths
    pub fn geometry(&self) -> Result<RomGeometry, RomError> {
        if self.ports.len() != 3 {
            return Err(RomError::Structure(format!(
                "expected 3 ports, found {}",
                self.ports.len()
            )));
        }
        RomConfig::new()
            .with_address_width(self.ports[1].width)
            .with_word_width(self.ports[2].width)
            .geometry()
    }

    /// Cell values wrapped with the implied geometry
    pub fn contents(&self) -> Result<RomContents, RomError> {
        Ok(RomContents::from_values(self.geometry()?, self.values.clone()))
    }

    /// Check the file has the shape of a generated ROM and that every cell
    /// satisfies the content invariants
    pub fn verify(&self) -> Result<RomGeometry, RomError> {
        let entity = match self.entities.as_slice() {
            [name] => name,
            other => {
                return Err(RomError::Structure(format!(
                    "expected exactly one entity, found {}",
                    other.len()
                )))
            }
        };

        match self.architectures.as_slice() {
            [arch] if arch.entity.eq_ignore_ascii_case(entity) => {}
            [arch] => {
                return Err(RomError::Structure(format!(
                    "architecture {} belongs to {}, not {}",
                    arch.name, arch.entity, entity
                )))
            }
            other => {
                return Err(RomError::Structure(format!(
                    "expected exactly one architecture, found {}",
                    other.len()
                )))
            }
        }

        let geometry = self.geometry()?;
        let expected = geometry.ports();
        for (found, wanted) in self.ports.iter().zip(&expected) {
            if found != wanted {
                return Err(RomError::Structure(format!(
                    "port {} {} {} does not match expected {} {} {}",
                    found.name,
                    found.direction,
                    found.vhdl_type(),
                    wanted.name,
                    wanted.direction,
                    wanted.vhdl_type()
                )));
            }
        }

        if self.data_drivers != 1 {
            return Err(RomError::Structure(format!(
                "{} must have exactly one driver, found {}",
                DATA_PORT, self.data_drivers
            )));
        }

        self.contents()?.verify()?;
        Ok(geometry)
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find("--") {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_port(line: &str, line_no: usize) -> Result<EntityPort, RomError> {
    let malformed = || RomError::Parse(format!("line {}: malformed port '{}'", line_no, line));

    let (name, rest) = line.split_once(':').ok_or_else(malformed)?;
    let rest = rest.trim().trim_end_matches(';').trim();
    let (direction, ty) = rest.split_once(char::is_whitespace).ok_or_else(malformed)?;

    let direction = match direction.to_ascii_lowercase().as_str() {
        "in" => PortDirection::In,
        "out" => PortDirection::Out,
        _ => return Err(malformed()),
    };

    let ty = ty.trim().to_ascii_lowercase();
    let width = if ty == "std_logic" {
        1
    } else {
        let range = ty
            .strip_prefix("std_logic_vector(")
            .and_then(|r| r.strip_suffix(')'))
            .ok_or_else(malformed)?;
        let (high, low) = range.split_once("downto").ok_or_else(malformed)?;
        let high: u32 = high.trim().parse().map_err(|_| malformed())?;
        let low: u32 = low.trim().parse().map_err(|_| malformed())?;
        if low != 0 {
            return Err(malformed());
        }
        high.checked_add(1).ok_or_else(malformed)?
    };

    Ok(EntityPort {
        name: name.trim().to_string(),
        direction,
        width,
    })
}

fn parse_cells(text: &str, line_no: usize, values: &mut Vec<u32>) -> Result<(), RomError> {
    for cell in text.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let value = cell.parse().map_err(|_| {
            RomError::Parse(format!("line {}: '{}' is not a cell value", line_no, cell))
        })?;
        values.push(value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vhdl::emitter::render_rom;

    fn sequential_text() -> String {
        let contents =
            RomContents::from_values(RomGeometry::new_unchecked(16, 6), (0..64).collect());
        render_rom("ROM_64x16", &contents)
    }

    #[test]
    fn test_reads_back_rendered_rom() {
        let report = inspect_rom(&sequential_text()).unwrap();

        assert_eq!(report.entities, vec!["ROM_64x16".to_string()]);
        assert_eq!(report.ports.len(), 3);
        assert_eq!(report.ports[1].width, 6);
        assert_eq!(report.ports[2].width, 16);
        assert_eq!(report.architectures[0].name, "rtl");
        assert_eq!(report.values, (0..64).collect::<Vec<u32>>());
        assert_eq!(report.data_drivers, 1);

        let geometry = report.verify().unwrap();
        assert_eq!(geometry.cell_count(), 64);
    }

    #[test]
    fn test_duplicate_driver_is_rejected() {
        let text = sequential_text().replace(
            "end architecture;",
            "\tdata_out <= data_s;\nend architecture;",
        );
        let report = inspect_rom(&text).unwrap();
        assert_eq!(report.data_drivers, 2);
        assert!(matches!(report.verify(), Err(RomError::Structure(_))));
    }

    #[test]
    fn test_tampered_cell_is_rejected() {
        let text = sequential_text().replace("\t\t0, 1, 2,", "\t\t0, 1, 67,");
        let report = inspect_rom(&text).unwrap();
        assert!(matches!(
            report.verify(),
            Err(RomError::InvariantViolation { address: 2, value: 67, .. })
        ));
    }

    #[test]
    fn test_missing_port_is_rejected() {
        let text = sequential_text().replace("\t\ten_in\t\t: in std_logic;\n", "");
        let report = inspect_rom(&text).unwrap();
        assert_eq!(report.ports.len(), 2);
        assert!(matches!(report.verify(), Err(RomError::Structure(_))));
    }

    #[test]
    fn test_garbage_cell_is_parse_error() {
        let text = sequential_text().replace("\t\t0, 1,", "\t\t0, x1,");
        assert!(matches!(inspect_rom(&text), Err(RomError::Parse(_))));
    }

    #[test]
    fn test_parse_port_widths() {
        let port = parse_port("addr_in : in  std_logic_vector(5 downto 0);", 1).unwrap();
        assert_eq!(port, EntityPort::input("addr_in", 6));

        let port = parse_port("en_in\t\t: in std_logic;", 1).unwrap();
        assert_eq!(port, EntityPort::input("en_in", 1));

        assert!(parse_port("data_out : inout std_logic", 1).is_err());
    }

    #[test]
    fn test_oversized_port_width_is_error() {
        let port = parse_port("data_out : out std_logic_vector(4294967295 downto 0)", 3);
        assert!(matches!(port, Err(RomError::Parse(_))));

        let text = "entity r is\n\tport (\n\t\tdata_out : out std_logic_vector(4294967295 downto 0)\n\t);\nend entity;\n";
        assert!(matches!(inspect_rom(text), Err(RomError::Parse(_))));

        // parses, but the geometry is rejected
        let text = sequential_text().replace("(15 downto 0)", "(40 downto 0)");
        let report = inspect_rom(&text).unwrap();
        assert!(matches!(report.verify(), Err(RomError::InvalidConfig(_))));
    }
}
