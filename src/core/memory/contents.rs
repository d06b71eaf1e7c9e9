use super::errors::RomError;
use crate::core::types::RomGeometry;
use rand::Rng;

/// Values stored in the ROM, indexed by address
///
/// Each word is `base * cell_count + address` with `base` drawn from
/// `[0, base_limit)`, so the low `address_width` bits of every word hold the
/// address of the cell that stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomContents {
    geometry: RomGeometry,
    values: Vec<u32>,
}

impl RomContents {
    /// Draw a fresh value for every cell
    pub fn generate<R: Rng + ?Sized>(geometry: RomGeometry, rng: &mut R) -> Self {
        let cells = geometry.cell_count() as u32;
        let limit = geometry.base_limit();
        let values = (0..cells)
            .map(|address| rng.gen_range(0..limit) * cells + address)
            .collect();
        Self { geometry, values }
    }

    /// Wrap existing values, e.g. read back from a generated file
    pub fn from_values(geometry: RomGeometry, values: Vec<u32>) -> Self {
        Self { geometry, values }
    }

    pub fn geometry(&self) -> RomGeometry {
        self.geometry
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value stored at `address`, if in range
    pub fn get(&self, address: usize) -> Option<u32> {
        self.values.get(address).copied()
    }

    /// Address encoded in the low bits of `value`
    pub fn address_of(&self, value: u32) -> usize {
        (value as usize) & (self.geometry.cell_count() - 1)
    }

    /// Check cell count, address encoding and value range of every cell
    pub fn verify(&self) -> Result<(), RomError> {
        let expected = self.geometry.cell_count();
        if self.values.len() != expected {
            return Err(RomError::Structure(format!(
                "expected {} cells, found {}",
                expected,
                self.values.len()
            )));
        }

        for (address, &value) in self.values.iter().enumerate() {
            let encoded = self.address_of(value);
            if encoded != address {
                return Err(RomError::InvariantViolation {
                    address,
                    value,
                    reason: format!("low bits encode address {}", encoded),
                });
            }
            let max = self.geometry.max_value_at(address);
            if u64::from(value) > max {
                return Err(RomError::InvariantViolation {
                    address,
                    value,
                    reason: format!("exceeds maximum {}", max),
                });
            }
        }
        Ok(())
    }
}
