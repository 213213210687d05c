//! Cal3D binary dialect (version 700).
//!
//! Little-endian throughout: a raw 4-byte magic tag, a u32 version, then
//! counts and payload arrays in fixed field order. Version 700 predates
//! vertex colors, submesh morphs and bone lights; those stay text-only.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::model::{Animation, Bone, Material, Mesh, Skeleton, SubMesh, Vertex};
use crate::transform::{array_to_quat, export_rotation};

use super::{ANIMATION_MAGIC, BINARY_VERSION, MATERIAL_MAGIC, MESH_MAGIC, SKELETON_MAGIC};

fn write_string<W: Write>(w: &mut W, s: &str) -> io::Result<()> {
    // Length includes the terminating NUL.
    w.write_u32::<LittleEndian>(s.len() as u32 + 1)?;
    w.write_all(s.as_bytes())?;
    w.write_u8(0)?;
    Ok(())
}

fn write_vec3<W: Write>(w: &mut W, v: &[f32; 3]) -> io::Result<()> {
    for component in v {
        w.write_f32::<LittleEndian>(*component)?;
    }
    Ok(())
}

fn write_exported_rotation<W: Write>(w: &mut W, rotation: &[f32; 4]) -> io::Result<()> {
    for component in export_rotation(&array_to_quat(rotation)) {
        w.write_f32::<LittleEndian>(component)?;
    }
    Ok(())
}

pub fn write_skeleton<W: Write>(w: &mut W, skeleton: &Skeleton) -> io::Result<()> {
    w.write_all(SKELETON_MAGIC)?;
    w.write_u32::<LittleEndian>(BINARY_VERSION)?;
    w.write_u32::<LittleEndian>(skeleton.bones.len() as u32)?;
    for bone in &skeleton.bones {
        write_bone(w, bone)?;
    }
    Ok(())
}

fn write_bone<W: Write>(w: &mut W, bone: &Bone) -> io::Result<()> {
    write_string(w, &bone.name)?;

    write_vec3(w, &bone.local_translation)?;
    write_exported_rotation(w, &bone.local_rotation)?;
    write_vec3(w, &bone.bind_translation)?;
    write_exported_rotation(w, &bone.bind_rotation)?;

    match bone.parent {
        Some(parent) => w.write_u32::<LittleEndian>(parent)?,
        None => w.write_i32::<LittleEndian>(-1)?,
    }
    w.write_u32::<LittleEndian>(bone.children.len() as u32)?;
    for child in &bone.children {
        w.write_u32::<LittleEndian>(*child)?;
    }
    Ok(())
}

pub fn write_mesh<W: Write>(w: &mut W, mesh: &Mesh) -> io::Result<()> {
    w.write_all(MESH_MAGIC)?;
    w.write_u32::<LittleEndian>(BINARY_VERSION)?;
    w.write_u32::<LittleEndian>(mesh.submeshes.len() as u32)?;
    for submesh in &mesh.submeshes {
        write_submesh(w, submesh)?;
    }
    Ok(())
}

fn write_submesh<W: Write>(w: &mut W, submesh: &SubMesh) -> io::Result<()> {
    let mut vertices: Vec<&Vertex> = submesh.vertices.iter().collect();
    vertices.sort_by_key(|v| v.export_index);

    w.write_i32::<LittleEndian>(submesh.material_use_index as i32)?;
    w.write_i32::<LittleEndian>(vertices.len() as i32)?;
    w.write_i32::<LittleEndian>(submesh.triangle_count() as i32)?;
    w.write_i32::<LittleEndian>(0)?; // lod steps
    w.write_i32::<LittleEndian>(0)?; // springs
    w.write_i32::<LittleEndian>(submesh.texcoord_count() as i32)?;

    for vertex in &vertices {
        write_vertex(w, vertex)?;
    }
    for face in &submesh.faces {
        let [a, b, c] = face.vertices;
        w.write_u32::<LittleEndian>(a)?;
        w.write_u32::<LittleEndian>(b)?;
        w.write_u32::<LittleEndian>(c)?;
        if let Some(d) = face.vertex4 {
            w.write_u32::<LittleEndian>(a)?;
            w.write_u32::<LittleEndian>(c)?;
            w.write_u32::<LittleEndian>(d)?;
        }
    }
    Ok(())
}

fn write_vertex<W: Write>(w: &mut W, vertex: &Vertex) -> io::Result<()> {
    write_vec3(w, &vertex.position)?;
    write_vec3(w, &vertex.normal)?;

    w.write_u32::<LittleEndian>(0)?; // collapse id
    w.write_u32::<LittleEndian>(0)?; // face collapse count

    for map in &vertex.maps {
        w.write_f32::<LittleEndian>(map.u)?;
        w.write_f32::<LittleEndian>(map.v)?;
    }

    let influences = vertex.sorted_normalized_influences();
    w.write_u32::<LittleEndian>(influences.len() as u32)?;
    for influence in &influences {
        w.write_u32::<LittleEndian>(influence.bone_id)?;
        w.write_f32::<LittleEndian>(influence.weight)?;
    }
    Ok(())
}

pub fn write_animation<W: Write>(w: &mut W, animation: &Animation) -> io::Result<()> {
    w.write_all(ANIMATION_MAGIC)?;
    w.write_u32::<LittleEndian>(BINARY_VERSION)?;
    w.write_u32::<LittleEndian>(0)?; // reserved
    w.write_f32::<LittleEndian>(animation.duration)?;
    w.write_u32::<LittleEndian>(animation.tracks.len() as u32)?;
    w.write_u32::<LittleEndian>(0)?; // track flags, bit 0 = compressed

    for track in &animation.tracks {
        w.write_u32::<LittleEndian>(track.bone_id)?;
        w.write_u32::<LittleEndian>(track.keyframes.len() as u32)?;
        for keyframe in &track.keyframes {
            w.write_f32::<LittleEndian>(keyframe.time)?;
            write_vec3(w, &keyframe.translation)?;
            write_exported_rotation(w, &keyframe.rotation)?;
        }
    }
    Ok(())
}

pub fn write_material<W: Write>(w: &mut W, material: &Material) -> io::Result<()> {
    w.write_all(MATERIAL_MAGIC)?;
    w.write_u32::<LittleEndian>(BINARY_VERSION)?;

    w.write_all(&material.ambient)?;
    w.write_all(&material.diffuse)?;
    w.write_all(&material.specular)?;
    w.write_f32::<LittleEndian>(material.shininess)?;

    w.write_u32::<LittleEndian>(material.maps.len() as u32)?;
    for map in &material.maps {
        write_string(w, map)?;
    }
    Ok(())
}
