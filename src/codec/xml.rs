//! Cal3D text dialect (version 919).
//!
//! The formatting is a contract, not a default: 6 decimal places for
//! geometry and rotations, 5 for keyframe times and durations, 3 for
//! vertex colors, plain integers for material RGBA. Some consumers parse
//! with fixed-width assumptions.

use crate::model::{
    Animation, Bone, LightType, Material, Mesh, Morph, MorphAnimation, Skeleton, SubMesh, Vertex,
};
use crate::transform::{array_to_quat, export_rotation};

use super::XML_VERSION;

fn header(magic: &str) -> String {
    format!("<HEADER MAGIC=\"{magic}\" VERSION=\"{XML_VERSION}\"/>\n")
}

pub fn skeleton_to_xml(skeleton: &Skeleton) -> String {
    let mut s = header("XSF");
    match skeleton.scene_ambient_color {
        Some(c) => s.push_str(&format!(
            "<SKELETON NUMBONES=\"{}\" SCENEAMBIENTCOLOR=\"{:.6} {:.6} {:.6}\">\n",
            skeleton.bones.len(),
            c[0],
            c[1],
            c[2]
        )),
        None => s.push_str(&format!(
            "<SKELETON NUMBONES=\"{}\">\n",
            skeleton.bones.len()
        )),
    }
    for bone in &skeleton.bones {
        push_bone_xml(&mut s, bone);
    }
    s.push_str("</SKELETON>\n");
    s
}

fn push_bone_xml(s: &mut String, bone: &Bone) {
    if bone.light_type == LightType::None {
        s.push_str(&format!(
            "  <BONE ID=\"{}\" NAME=\"{}\" NUMCHILDS=\"{}\">\n",
            bone.id,
            bone.name,
            bone.children.len()
        ));
    } else {
        s.push_str(&format!(
            "  <BONE ID=\"{}\" NAME=\"{}\" NUMCHILDS=\"{}\" LIGHTTYPE=\"{}\" LIGHTCOLOR=\"{:.6} {:.6} {:.6}\">\n",
            bone.id,
            bone.name,
            bone.children.len(),
            bone.light_type.cal3d_value(),
            bone.light_color[0],
            bone.light_color[1],
            bone.light_color[2]
        ));
    }

    let t = bone.local_translation;
    s.push_str(&format!(
        "    <TRANSLATION>{:.6} {:.6} {:.6}</TRANSLATION>\n",
        t[0], t[1], t[2]
    ));

    let r = export_rotation(&array_to_quat(&bone.local_rotation));
    s.push_str(&format!(
        "    <ROTATION>{:.6} {:.6} {:.6} {:.6}</ROTATION>\n",
        r[0], r[1], r[2], r[3]
    ));

    let lt = bone.bind_translation;
    s.push_str(&format!(
        "    <LOCALTRANSLATION>{:.6} {:.6} {:.6}</LOCALTRANSLATION>\n",
        lt[0], lt[1], lt[2]
    ));

    let lr = export_rotation(&array_to_quat(&bone.bind_rotation));
    s.push_str(&format!(
        "    <LOCALROTATION>{:.6} {:.6} {:.6} {:.6}</LOCALROTATION>\n",
        lr[0], lr[1], lr[2], lr[3]
    ));

    let parent = bone.parent.map_or(-1, |p| p as i64);
    s.push_str(&format!("    <PARENTID>{parent}</PARENTID>\n"));
    for child in &bone.children {
        s.push_str(&format!("    <CHILDID>{child}</CHILDID>\n"));
    }
    s.push_str("  </BONE>\n");
}

pub fn mesh_to_xml(mesh: &Mesh) -> String {
    let mut s = header("XMF");
    s.push_str(&format!("<MESH NUMSUBMESH=\"{}\">\n", mesh.submeshes.len()));
    for submesh in &mesh.submeshes {
        push_submesh_xml(&mut s, submesh);
    }
    s.push_str("</MESH>\n");
    s
}

fn push_submesh_xml(s: &mut String, submesh: &SubMesh) {
    let mut vertices: Vec<&Vertex> = submesh.vertices.iter().collect();
    vertices.sort_by_key(|v| v.export_index);

    s.push_str(&format!(
        "  <SUBMESH NUMVERTICES=\"{}\" NUMFACES=\"{}\" MATERIAL=\"{}\" NUMLODSTEPS=\"0\" NUMSPRINGS=\"0\" NUMTEXCOORDS=\"{}\" NUMMORPHS=\"{}\">\n",
        vertices.len(),
        submesh.triangle_count(),
        submesh.material_use_index,
        submesh.texcoord_count(),
        submesh.morphs.len()
    ));

    for vertex in &vertices {
        push_vertex_xml(s, vertex);
    }
    for morph in &submesh.morphs {
        push_morph_xml(s, morph);
    }
    for face in &submesh.faces {
        let [a, b, c] = face.vertices;
        s.push_str(&format!("    <FACE VERTEXID=\"{a} {b} {c}\"/>\n"));
        if let Some(d) = face.vertex4 {
            s.push_str(&format!("    <FACE VERTEXID=\"{a} {c} {d}\"/>\n"));
        }
    }
    s.push_str("  </SUBMESH>\n");
}

fn push_vertex_xml(s: &mut String, vertex: &Vertex) {
    let influences = vertex.sorted_normalized_influences();

    s.push_str(&format!(
        "    <VERTEX ID=\"{}\" NUMINFLUENCES=\"{}\">\n",
        vertex.export_index,
        influences.len()
    ));
    let p = vertex.position;
    s.push_str(&format!(
        "      <POS>{:.6} {:.6} {:.6}</POS>\n",
        p[0], p[1], p[2]
    ));
    let n = vertex.normal;
    s.push_str(&format!(
        "      <NORM>{:.6} {:.6} {:.6}</NORM>\n",
        n[0], n[1], n[2]
    ));
    let c = vertex.color;
    s.push_str(&format!(
        "      <COLOR>{:.3} {:.3} {:.3}</COLOR>\n",
        c[0], c[1], c[2]
    ));
    for map in &vertex.maps {
        s.push_str(&format!(
            "      <TEXCOORD>{:.6} {:.6}</TEXCOORD>\n",
            map.u, map.v
        ));
    }
    for influence in &influences {
        s.push_str(&format!(
            "      <INFLUENCE ID=\"{}\">{:.6}</INFLUENCE>\n",
            influence.bone_id, influence.weight
        ));
    }
    s.push_str("    </VERTEX>\n");
}

fn push_morph_xml(s: &mut String, morph: &Morph) {
    s.push_str(&format!(
        "<MORPH NAME=\"{}\" NUMBLENDVERTS=\"{}\" MORPHID=\"{}\"",
        morph.name,
        morph.blend_vertices.len(),
        morph.morph_id
    ));
    if morph.blend_vertices.is_empty() {
        s.push_str(" />\n");
        return;
    }
    s.push_str(">\n");
    for bv in &morph.blend_vertices {
        s.push_str(&format!(
            "    <BLENDVERTEX ID=\"{}\" POSDIFF=\"{:.6}\">\n",
            bv.export_index, bv.posdiff
        ));
        s.push_str(&format!(
            "      <POSITION>{:.6} {:.6} {:.6}</POSITION>\n",
            bv.position[0], bv.position[1], bv.position[2]
        ));
        s.push_str(&format!(
            "      <NORMAL>{:.6} {:.6} {:.6}</NORMAL>\n",
            bv.normal[0], bv.normal[1], bv.normal[2]
        ));
        for map in &bv.maps {
            s.push_str(&format!(
                "      <TEXCOORD>{:.6} {:.6}</TEXCOORD>\n",
                map.u, map.v
            ));
        }
        s.push_str("    </BLENDVERTEX>\n");
    }
    s.push_str("</MORPH>\n");
}

pub fn animation_to_xml(animation: &Animation) -> String {
    let mut s = header("XAF");
    s.push_str(&format!(
        "<ANIMATION DURATION=\"{:.5}\" NUMTRACKS=\"{}\">\n",
        animation.duration,
        animation.tracks.len()
    ));
    for track in &animation.tracks {
        s.push_str(&format!(
            "  <TRACK BONEID=\"{}\" TRANSLATIONREQUIRED=\"1\" TRANSLATIONISDYNAMIC=\"1\" HIGHRANGEREQUIRED=\"1\" NUMKEYFRAMES=\"{}\">\n",
            track.bone_id,
            track.keyframes.len()
        ));
        for keyframe in &track.keyframes {
            s.push_str(&format!("    <KEYFRAME TIME=\"{:.5}\">\n", keyframe.time));
            let t = keyframe.translation;
            s.push_str(&format!(
                "      <TRANSLATION>{:.6} {:.6} {:.6}</TRANSLATION>\n",
                t[0], t[1], t[2]
            ));
            let r = export_rotation(&array_to_quat(&keyframe.rotation));
            s.push_str(&format!(
                "      <ROTATION>{:.6} {:.6} {:.6} {:.6}</ROTATION>\n",
                r[0], r[1], r[2], r[3]
            ));
            s.push_str("    </KEYFRAME>\n");
        }
        s.push_str("  </TRACK>\n");
    }
    s.push_str("</ANIMATION>\n");
    s
}

pub fn morph_animation_to_xml(animation: &MorphAnimation) -> String {
    let mut s = header("XPF");
    // Attribute order differs from the skeletal dialect: tracks first.
    s.push_str(&format!(
        "<ANIMATION NUMTRACKS=\"{}\" DURATION=\"{:.5}\">\n",
        animation.tracks.len(),
        animation.duration
    ));
    for track in &animation.tracks {
        s.push_str(&format!(
            "  <TRACK NUMKEYFRAMES=\"{}\" MORPHNAME=\"{}\">\n",
            track.keyframes.len(),
            track.morph_name
        ));
        for keyframe in &track.keyframes {
            s.push_str(&format!("    <KEYFRAME TIME=\"{:.5}\">\n", keyframe.time));
            s.push_str(&format!("      <WEIGHT>{:.6}</WEIGHT>\n", keyframe.weight));
            s.push_str("    </KEYFRAME>\n");
        }
        s.push_str("  </TRACK>\n");
    }
    s.push_str("</ANIMATION>\n");
    s
}

pub fn material_to_xml(material: &Material) -> String {
    let mut s = header("XRF");
    s.push_str(&format!(
        "  <MATERIAL NUMMAPS=\"{}\">\n",
        material.maps.len()
    ));
    let a = material.ambient;
    s.push_str(&format!(
        "  <AMBIENT>{} {} {} {}</AMBIENT>\n",
        a[0], a[1], a[2], a[3]
    ));
    let d = material.diffuse;
    s.push_str(&format!(
        "  <DIFFUSE>{} {} {} {}</DIFFUSE>\n",
        d[0], d[1], d[2], d[3]
    ));
    let sp = material.specular;
    s.push_str(&format!(
        "  <SPECULAR>{} {} {} {}</SPECULAR>\n",
        sp[0], sp[1], sp[2], sp[3]
    ));
    s.push_str(&format!("  <SHININESS>{:.6}</SHININESS>\n", material.shininess));
    for map in &material.maps {
        s.push_str(&format!("  <MAP>{map}</MAP>\n"));
    }
    s.push_str("</MATERIAL>\n");
    s
}
