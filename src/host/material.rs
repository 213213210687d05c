/// A material discovered by the host, in host discovery order.
///
/// Only the name and the texture map filenames cross the boundary; map
/// files themselves are host-side assets. Materials without any map are
/// not exportable and are dropped during discovery.
#[derive(Debug, Clone, Default)]
pub struct MaterialDesc {
    pub name: String,
    pub maps: Vec<String>,
}

impl MaterialDesc {
    pub fn new(name: impl Into<String>, maps: Vec<String>) -> Self {
        Self {
            name: name.into(),
            maps,
        }
    }
}
