use crate::core::memory::RomContents;
use crate::core::types::{EntityPort, ADDRESS_PORT, DATA_PORT, ENABLE_PORT};

pub const ARCHITECTURE_NAME: &str = "rtl";
pub const ARRAY_TYPE: &str = "ROM_t";
pub const CONSTANT_NAME: &str = "ROM_c";
pub const SIGNAL_NAME: &str = "data_s";

/// Cells written on each line of the constant initializer
pub const CELLS_PER_LINE: usize = 8;

const TAB_WIDTH: usize = 4;

/// Render the complete VHDL description of a ROM holding `contents`
pub fn render_rom(entity_name: &str, contents: &RomContents) -> String {
    let geometry = contents.geometry();
    let word_width = geometry.word_width();
    let mut out = String::new();

    out.push_str("library IEEE;\n");
    out.push_str("  use IEEE.std_logic_1164.all;\n");
    out.push_str("  use IEEE.numeric_std.all;\n");
    out.push('\n');

    out.push_str(&format!("entity {} is\n", entity_name));
    out.push_str(&render_port_clause(&geometry.ports()));
    out.push_str("end entity;\n");
    out.push('\n');

    out.push_str(&format!("architecture {} of {} is\n", ARCHITECTURE_NAME, entity_name));
    out.push('\n');
    out.push_str(&format!(
        "\ttype {} is array (natural range 0 to {}) of integer;\n",
        ARRAY_TYPE,
        geometry.cell_count() - 1
    ));
    out.push_str(&format!("\tconstant {}\t: {} := (\n", CONSTANT_NAME, ARRAY_TYPE));
    out.push_str(&render_cells(contents.values()));
    out.push_str("\t);\n");
    out.push_str(&format!(
        "\tsignal {}\t: std_logic_vector({} downto 0);\n",
        SIGNAL_NAME,
        word_width - 1
    ));
    out.push_str("begin\n");

    // data_out has a single driver; the lookup goes through data_s
    out.push_str(&format!(
        "\t{} <= std_logic_vector(to_unsigned({}(to_integer(unsigned({}))), {}));\n",
        SIGNAL_NAME, CONSTANT_NAME, ADDRESS_PORT, word_width
    ));
    out.push_str(&format!(
        "\t{} <= {} when {} = '1' else (others => 'Z');\n",
        DATA_PORT, SIGNAL_NAME, ENABLE_PORT
    ));
    out.push_str("end architecture;\n");

    out
}

fn render_port_clause(ports: &[EntityPort]) -> String {
    let longest = ports.iter().map(|p| p.name.len()).max().unwrap_or(0);
    let column = (longest / TAB_WIDTH + 1) * TAB_WIDTH;

    let mut out = String::from("\tport (\n");
    for (i, port) in ports.iter().enumerate() {
        let tabs = (column - port.name.len() + TAB_WIDTH - 1) / TAB_WIDTH;
        let separator = if i + 1 == ports.len() { "" } else { ";" };
        out.push_str(&format!(
            "\t\t{}{}: {} {}{}\n",
            port.name,
            "\t".repeat(tabs),
            port.direction,
            port.vhdl_type(),
            separator
        ));
    }
    out.push_str("\t);\n");
    out
}

/// Comma separated cells, `CELLS_PER_LINE` per line, no trailing comma
fn render_cells(values: &[u32]) -> String {
    let mut out = String::new();
    let lines = values.len().div_ceil(CELLS_PER_LINE);
    for (i, chunk) in values.chunks(CELLS_PER_LINE).enumerate() {
        let line: Vec<String> = chunk.iter().map(|v| v.to_string()).collect();
        out.push_str("\t\t");
        out.push_str(&line.join(", "));
        if i + 1 < lines {
            out.push(',');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RomGeometry;

    fn sequential_contents() -> RomContents {
        RomContents::from_values(RomGeometry::new_unchecked(16, 6), (0..64).collect())
    }

    #[test]
    fn test_port_clause_alignment() {
        let clause = render_port_clause(&RomGeometry::new_unchecked(16, 6).ports());
        assert_eq!(
            clause,
            "\tport (\n\
             \t\ten_in\t\t: in std_logic;\n\
             \t\taddr_in\t\t: in std_logic_vector(5 downto 0);\n\
             \t\tdata_out\t: out std_logic_vector(15 downto 0)\n\
             \t);\n"
        );
    }

    #[test]
    fn test_cells_break_after_every_eighth() {
        let text = render_cells(&(0..16).collect::<Vec<u32>>());
        assert_eq!(
            text,
            "\t\t0, 1, 2, 3, 4, 5, 6, 7,\n\t\t8, 9, 10, 11, 12, 13, 14, 15\n"
        );
    }

    #[test]
    fn test_short_rom_fits_one_line() {
        let text = render_cells(&[0, 1, 2, 3]);
        assert_eq!(text, "\t\t0, 1, 2, 3\n");
    }

    #[test]
    fn test_render_default_rom() {
        let text = render_rom("ROM_64x16", &sequential_contents());

        assert!(text.starts_with("library IEEE;\n"));
        assert!(text.contains("entity ROM_64x16 is\n"));
        assert!(text.contains("architecture rtl of ROM_64x16 is\n"));
        assert!(text.contains("\ttype ROM_t is array (natural range 0 to 63) of integer;\n"));
        assert!(text.contains("\t\t56, 57, 58, 59, 60, 61, 62, 63\n\t);\n"));
        assert!(text.contains("\tsignal data_s\t: std_logic_vector(15 downto 0);\n"));
        assert!(text.contains("to_unsigned(ROM_c(to_integer(unsigned(addr_in))), 16)"));
        assert!(text.ends_with("end architecture;\n"));
    }

    #[test]
    fn test_data_out_driven_once() {
        let text = render_rom("ROM_64x16", &sequential_contents());
        let drivers = text.lines().filter(|l| l.trim_start().starts_with("data_out <=")).count();
        assert_eq!(drivers, 1);
        assert!(text.contains("\tdata_out <= data_s when en_in = '1' else (others => 'Z');\n"));
    }
}
