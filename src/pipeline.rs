use crate::builder::{build_animation, build_mesh, build_morph_animation, build_skeleton};
use crate::config::ExportConfig;
use crate::diagnostics::Diagnostics;
use crate::error::ExportError;
use crate::host::{ActionSource, BoneSource, MaterialDesc, MeshSource, MorphActionSource};
use crate::model::{Animation, MaterialSet, Mesh, MorphAnimation, Skeleton};

/// Everything one export pass produced. The caller decides which entities
/// to serialize and where the files go.
#[derive(Debug, Default)]
pub struct ExportSet {
    pub skeleton: Option<Skeleton>,
    pub materials: MaterialSet,
    pub meshes: Vec<Mesh>,
    pub animations: Vec<Animation>,
    pub morph_animations: Vec<MorphAnimation>,
}

/// One export pass: skeleton first, then materials, meshes, actions, in a
/// fixed order so material use-order (and with it `used_index` assignment)
/// is deterministic.
///
/// A failing mesh or action loses only its own output; the failure is
/// recorded and the pass continues. A skeleton failure is fatal because
/// both meshes and animations depend on it.
pub struct ExportPass {
    pub config: ExportConfig,
    pub diagnostics: Diagnostics,
}

impl ExportPass {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn run(
        &mut self,
        armatures: &[&dyn BoneSource],
        materials: &[MaterialDesc],
        meshes: &[&dyn MeshSource],
        actions: &[&dyn ActionSource],
        morph_actions: &[&dyn MorphActionSource],
    ) -> Result<ExportSet, ExportError> {
        let mut set = ExportSet::default();

        if armatures.len() > 1 {
            self.diagnostics
                .error("more than one armature selected; aborting export");
            return Err(ExportError::MultipleArmatures);
        }
        if let Some(armature) = armatures.first() {
            let skeleton = build_skeleton(*armature, &mut self.diagnostics);
            self.diagnostics.info(format!(
                "skeleton `{}`: {} bone(s)",
                skeleton.name,
                skeleton.bones.len()
            ));
            set.skeleton = Some(skeleton);
        }

        set.materials = MaterialSet::discover(materials);
        if set.materials.is_empty() && !meshes.is_empty() {
            self.diagnostics.error(ExportError::EmptyMaterialSet.to_string());
        } else {
            for mesh_source in meshes {
                match build_mesh(
                    *mesh_source,
                    set.skeleton.as_ref(),
                    &mut set.materials,
                    &self.config,
                    &mut self.diagnostics,
                ) {
                    Ok(mesh) => {
                        self.diagnostics.info(format!(
                            "mesh `{}`: {} submesh(es)",
                            mesh.name,
                            mesh.submeshes.len()
                        ));
                        set.meshes.push(mesh);
                    }
                    Err(err) => self.diagnostics.error(err.to_string()),
                }
            }
        }

        if let Some(skeleton) = &set.skeleton {
            for action in actions {
                if let Some(animation) =
                    build_animation(*action, skeleton, &self.config, &mut self.diagnostics)
                {
                    set.animations.push(animation);
                }
            }
        }

        for action in morph_actions {
            if let Some(animation) =
                build_morph_animation(*action, &self.config, &mut self.diagnostics)
            {
                set.morph_animations.push(animation);
            }
        }

        let summary = self.diagnostics.summary();
        self.diagnostics.info(summary);
        Ok(set)
    }
}
