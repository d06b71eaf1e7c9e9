/// Direction of an entity port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    In,
    Out,
}

impl PortDirection {
    /// VHDL keyword for this direction
    pub fn keyword(&self) -> &'static str {
        match self {
            PortDirection::In => "in",
            PortDirection::Out => "out",
        }
    }
}

impl std::fmt::Display for PortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A port on the ROM entity boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityPort {
    pub name: String,
    pub direction: PortDirection,
    /// Width in bits; a width of 1 is a scalar `std_logic`
    pub width: u32,
}

impl EntityPort {
    /// Create a new input port
    pub fn input(name: &str, width: u32) -> Self {
        Self {
            name: name.to_string(),
            direction: PortDirection::In,
            width,
        }
    }

    /// Create a new output port
    pub fn output(name: &str, width: u32) -> Self {
        Self {
            name: name.to_string(),
            direction: PortDirection::Out,
            width,
        }
    }

    /// VHDL type of this port
    pub fn vhdl_type(&self) -> String {
        if self.width == 1 {
            "std_logic".to_string()
        } else {
            format!("std_logic_vector({} downto 0)", self.width - 1)
        }
    }
}

pub const ENABLE_PORT: &str = "en_in";
pub const ADDRESS_PORT: &str = "addr_in";
pub const DATA_PORT: &str = "data_out";

/// Dimensions of a ROM, derived from a validated configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomGeometry {
    word_width: u32,
    address_width: u32,
}

impl RomGeometry {
    /// Build a geometry without validation. Use `RomConfig::geometry` for checked values.
    pub(crate) fn new_unchecked(word_width: u32, address_width: u32) -> Self {
        Self {
            word_width,
            address_width,
        }
    }

    pub fn word_width(&self) -> u32 {
        self.word_width
    }

    pub fn address_width(&self) -> u32 {
        self.address_width
    }

    /// Number of storage cells (2^address_width)
    pub fn cell_count(&self) -> usize {
        1usize << self.address_width
    }

    /// Exclusive upper bound of the random base drawn for each cell
    ///
    /// The base occupies the word bits above the address bits, with its top
    /// value excluded: `[0, 1023)` for a 64x16 ROM.
    pub fn base_limit(&self) -> u32 {
        (1u32 << (self.word_width - self.address_width)) - 1
    }

    /// Largest value that may be stored at `address`
    pub fn max_value_at(&self, address: usize) -> u64 {
        let scaled = (self.cell_count() as u64) * u64::from(self.base_limit().saturating_sub(1));
        scaled + address as u64
    }

    /// Largest value that may be stored anywhere in the ROM
    pub fn max_value(&self) -> u64 {
        self.max_value_at(self.cell_count() - 1)
    }

    /// The three entity ports: enable, address and data
    pub fn ports(&self) -> Vec<EntityPort> {
        vec![
            EntityPort::input(ENABLE_PORT, 1),
            EntityPort::input(ADDRESS_PORT, self.address_width),
            EntityPort::output(DATA_PORT, self.word_width),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_values() {
        let geometry = RomGeometry::new_unchecked(16, 6);
        assert_eq!(geometry.cell_count(), 64);
        assert_eq!(geometry.base_limit(), 1023);
        assert_eq!(geometry.max_value_at(0), 65408);
        assert_eq!(geometry.max_value(), 65408 + 63);
        assert!(geometry.max_value() < 1 << 16);
    }

    #[test]
    fn test_ports() {
        let ports = RomGeometry::new_unchecked(16, 6).ports();
        assert_eq!(ports.len(), 3);
        assert_eq!(ports[0].vhdl_type(), "std_logic");
        assert_eq!(ports[1].vhdl_type(), "std_logic_vector(5 downto 0)");
        assert_eq!(ports[2].direction, PortDirection::Out);
        assert_eq!(ports[2].vhdl_type(), "std_logic_vector(15 downto 0)");
    }

    #[test]
    fn test_smallest_random_field() {
        // one bit above the address leaves a single possible base
        let geometry = RomGeometry::new_unchecked(3, 2);
        assert_eq!(geometry.base_limit(), 1);
        assert_eq!(geometry.max_value_at(2), 2);
    }
}
