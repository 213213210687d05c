use serde::{Deserialize, Serialize};

use crate::host::MaterialDesc;

/// One exportable material. Colors are 8-bit RGBA as the material dialects
/// store them; the host only supplies name and map filenames, everything
/// else keeps the engine defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Discovery order among materials that carry at least one map.
    pub index: u32,
    pub in_use: bool,
    /// Position in the used-material table, assigned on first use.
    pub used_index: Option<u32>,
    pub ambient: [u8; 4],
    pub diffuse: [u8; 4],
    pub specular: [u8; 4],
    pub shininess: f32,
    pub maps: Vec<String>,
}

impl Material {
    fn new(name: String, index: u32, maps: Vec<String>) -> Self {
        Self {
            name,
            index,
            in_use: false,
            used_index: None,
            ambient: [255, 255, 255, 255],
            diffuse: [255, 255, 255, 255],
            specular: [0, 0, 0, 255],
            shininess: 0.0,
            maps,
        }
    }
}

/// A material name ending in a bracketed number, e.g. `Skin[3]`, pins the
/// used index explicitly. No collision detection is performed against
/// sequential assignment or other explicit numbers.
fn explicit_used_index(name: &str) -> Option<u32> {
    let rest = name.strip_suffix(']')?;
    let open = rest.rfind('[')?;
    rest[open + 1..].parse().ok()
}

/// The pass-wide material registry. Append-only: discovery fills the
/// material list once, and `mark_used` appends to the use-order table
/// exactly once per material. Use order is observable in the output, so
/// callers must process meshes in a fixed order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialSet {
    materials: Vec<Material>,
    used_order: Vec<usize>,
}

impl MaterialSet {
    /// Build the registry from the host's discovered materials. Descs
    /// without any texture map are skipped; indices are dense over the
    /// materials that survive.
    pub fn discover(descs: &[MaterialDesc]) -> Self {
        let mut materials = Vec::new();
        for desc in descs {
            if desc.maps.is_empty() {
                continue;
            }
            let index = materials.len() as u32;
            materials.push(Material::new(desc.name.clone(), index, desc.maps.clone()));
        }
        Self {
            materials,
            used_order: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn find_by_name(&self, name: &str) -> Option<u32> {
        self.materials
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.index)
    }

    /// Mark a material as used and return its used index. First use
    /// assigns either the next sequential slot or the explicit `Name[N]`
    /// number; later calls return the already-assigned index.
    pub fn mark_used(&mut self, index: u32) -> u32 {
        let slot = index as usize;
        if let Some(used) = self.materials[slot].used_index {
            return used;
        }
        let used = explicit_used_index(&self.materials[slot].name)
            .unwrap_or(self.used_order.len() as u32);
        self.materials[slot].in_use = true;
        self.materials[slot].used_index = Some(used);
        self.used_order.push(slot);
        used
    }

    /// Materials in first-use order.
    pub fn used_materials(&self) -> impl Iterator<Item = &Material> {
        self.used_order.iter().map(|&slot| &self.materials[slot])
    }
}
