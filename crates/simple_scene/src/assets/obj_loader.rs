//! OBJ file loader for 3D models
//!
//! Produces a [`RawModel`]: attribute arrays, polygon faces and the material
//! list with each material's faces. Material libraries named by `mtllib` are
//! resolved through the same [`AssetContext`] as the model itself.

use std::io::{BufRead, BufReader, Read};

use log::{debug, warn};
use thiserror::Error;

use super::materials::{MtlData, MtlParser};
use super::{AssetContext, AssetError};
use crate::foundation::math::{pack_rgba, WHITE_RGBA};
use crate::mesh::{Face, FaceVertex, RawMaterial, RawModel, TextureSlot};

/// Name of the material that owns faces declared before any `usemtl`
pub const DEFAULT_MATERIAL: &str = "default";

/// OBJ parsing errors
#[derive(Error, Debug)]
pub enum ObjError {
    /// The model or a material library could not be resolved or opened
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Reading the stream failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A statement in the OBJ file is malformed
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong
        message: String,
    },

    /// A material library is malformed
    #[error("Material library '{library}': {message}")]
    Material {
        /// Library name as written after `mtllib`
        library: String,
        /// Parser message
        message: String,
    },
}

/// Material list under construction, with each material's diffuse color
struct MaterialTable {
    materials: Vec<RawMaterial>,
    colors: Vec<u32>,
}

impl MaterialTable {
    fn new() -> Self {
        Self {
            materials: vec![RawMaterial::new(DEFAULT_MATERIAL)],
            colors: vec![WHITE_RGBA],
        }
    }

    fn declare(&mut self, data: &MtlData) {
        let mut material = RawMaterial::new(data.name.as_str());
        let maps = [
            (TextureSlot::Diffuse, &data.diffuse_map),
            (TextureSlot::Specular, &data.specular_map),
            (TextureSlot::Ambient, &data.ambient_map),
            (TextureSlot::Bump, &data.bump_map),
        ];
        for (slot, map) in maps {
            if let Some(map) = map {
                material = material.with_texture(slot, map.as_str());
            }
        }

        if let Some(index) = self.index_of(&data.name) {
            // Keep faces already assigned through an earlier usemtl
            material.faces = std::mem::take(&mut self.materials[index].faces);
            self.materials[index] = material;
            self.colors[index] = data.diffuse_rgba();
        } else {
            self.materials.push(material);
            self.colors.push(data.diffuse_rgba());
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name == name)
    }

    fn use_material(&mut self, name: &str) -> usize {
        if let Some(index) = self.index_of(name) {
            return index;
        }
        warn!("usemtl '{}' names an undeclared material, using it untextured", name);
        self.materials.push(RawMaterial::new(name));
        self.colors.push(WHITE_RGBA);
        self.materials.len() - 1
    }
}

/// Wavefront OBJ loader
pub struct ObjLoader;

impl ObjLoader {
    /// Resolve `filename` through `context` and parse it
    pub fn load(context: &AssetContext, filename: &str) -> Result<RawModel, ObjError> {
        let handle = context.lookup(filename)?;
        let stream = handle.open()?;
        debug!("Parsing OBJ {}", handle);
        Self::parse(BufReader::new(stream), context)
    }

    /// Parse OBJ statements from `reader`; `mtllib` names resolve through
    /// `context`
    pub fn parse<R: BufRead>(reader: R, context: &AssetContext) -> Result<RawModel, ObjError> {
        let mut model = RawModel::new();
        let mut position_colors: Vec<Option<u32>> = Vec::new();
        let mut table = MaterialTable::new();
        let mut current = 0;

        for (line_index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_num = line_index + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let Some(command) = tokens.next() else {
                continue;
            };
            let args: Vec<&str> = tokens.collect();

            match command {
                "v" => {
                    let values = parse_floats(&args, line_num, "v")?;
                    if values.len() < 3 {
                        return Err(parse_error(line_num, "v needs at least 3 coordinates"));
                    }
                    model.positions.push([values[0], values[1], values[2]]);
                    position_colors.push(
                        (values.len() >= 6).then(|| pack_rgba(values[3], values[4], values[5], 1.0)),
                    );
                }
                "vn" => {
                    let values = parse_floats(&args, line_num, "vn")?;
                    if values.len() < 3 {
                        return Err(parse_error(line_num, "vn needs 3 components"));
                    }
                    model.normals.push([values[0], values[1], values[2]]);
                }
                "vt" => {
                    let values = parse_floats(&args, line_num, "vt")?;
                    let Some(&u) = values.first() else {
                        return Err(parse_error(line_num, "vt needs at least 1 component"));
                    };
                    model.tex_coords.push([u, values.get(1).copied().unwrap_or(0.0)]);
                }
                "f" => {
                    let mut corners = Vec::with_capacity(args.len());
                    for corner in &args {
                        let mut vertex = parse_corner(corner, &model, line_num)?;
                        vertex.color = position_colors
                            .get(vertex.position)
                            .copied()
                            .flatten()
                            .unwrap_or(table.colors[current]);
                        corners.push(vertex);
                    }
                    table.materials[current].faces.push(model.faces.len());
                    model.faces.push(Face::new(corners));
                }
                "mtllib" => {
                    if args.is_empty() {
                        return Err(parse_error(line_num, "mtllib missing library name"));
                    }
                    for library in &args {
                        for data in Self::load_library(context, library)? {
                            table.declare(&data);
                        }
                    }
                }
                "usemtl" => {
                    if args.is_empty() {
                        return Err(parse_error(line_num, "usemtl missing material name"));
                    }
                    current = table.use_material(&args.join(" "));
                }
                // Groups, objects, smoothing and anything else carry no geometry
                _ => {}
            }
        }

        model.materials = table.materials;
        Ok(model)
    }

    fn load_library(context: &AssetContext, library: &str) -> Result<Vec<MtlData>, ObjError> {
        let handle = context.lookup(library)?;
        let mut contents = String::new();
        handle
            .open()?
            .read_to_string(&mut contents)
            .map_err(|e| ObjError::Material {
                library: library.to_string(),
                message: e.to_string(),
            })?;

        let materials = MtlParser::parse(&contents).map_err(|message| ObjError::Material {
            library: library.to_string(),
            message,
        })?;
        debug!("Loaded {} material(s) from {}", materials.len(), handle);
        Ok(materials)
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> ObjError {
    ObjError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_floats(args: &[&str], line_num: usize, command: &str) -> Result<Vec<f32>, ObjError> {
    args.iter()
        .map(|token| {
            token
                .parse::<f32>()
                .map_err(|_| parse_error(line_num, format!("{command} invalid float value '{token}'")))
        })
        .collect()
}

/// Convert a 1-based or negative (relative to the end) OBJ index to 0-based
fn resolve_index(token: &str, len: usize, line_num: usize, what: &str) -> Result<usize, ObjError> {
    let raw: i64 = token
        .parse()
        .map_err(|_| parse_error(line_num, format!("invalid {what} index '{token}'")))?;

    let resolved = match raw {
        0 => None,
        r if r > 0 => usize::try_from(r - 1).ok(),
        r => usize::try_from(r.unsigned_abs())
            .ok()
            .and_then(|back| len.checked_sub(back)),
    };
    resolved.ok_or_else(|| parse_error(line_num, format!("{what} index {raw} out of range")))
}

/// Parse a face corner: `p`, `p/t`, `p//n` or `p/t/n`
fn parse_corner(token: &str, model: &RawModel, line_num: usize) -> Result<FaceVertex, ObjError> {
    let mut parts = token.split('/');
    let position = match parts.next() {
        Some(p) if !p.is_empty() => resolve_index(p, model.positions.len(), line_num, "position")?,
        _ => return Err(parse_error(line_num, format!("face corner '{token}' has no position"))),
    };

    let mut vertex = FaceVertex::new(position);
    if let Some(t) = parts.next().filter(|t| !t.is_empty()) {
        vertex = vertex.with_tex_coord(resolve_index(t, model.tex_coords.len(), line_num, "texture")?);
    }
    if let Some(n) = parts.next().filter(|n| !n.is_empty()) {
        vertex = vertex.with_normal(resolve_index(n, model.normals.len(), line_num, "normal")?);
    }
    if parts.next().is_some() {
        return Err(parse_error(line_num, format!("face corner '{token}' has too many fields")));
    }
    Ok(vertex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetResolver, MemoryArchive};
    use std::sync::Arc;

    fn context_with(files: &[(&str, &str)]) -> AssetContext {
        let archive = MemoryArchive::new();
        for (name, contents) in files {
            archive.insert(*name, contents.as_bytes().to_vec());
        }
        let resolver = Arc::new(AssetResolver::new());
        resolver.register(archive);
        resolver.context("")
    }

    fn parse_str(obj: &str, ctx: &AssetContext) -> Result<RawModel, ObjError> {
        ObjLoader::parse(obj.as_bytes(), ctx)
    }

    #[test]
    fn test_corner_formats() {
        let ctx = context_with(&[]);
        let model = parse_str(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvn 0 0 1\n\
             f 1 2 3\nf 1/1 2/2 3/1\nf 1//1 2//1 3//1\nf 1/1/1 2/2/1 3/2/1\n",
            &ctx,
        )
        .unwrap();

        assert_eq!(model.face_count(), 4);
        let f = &model.faces;
        assert_eq!(f[0].vertices[1], FaceVertex::new(1));
        assert_eq!(f[1].vertices[1], FaceVertex::new(1).with_tex_coord(1));
        assert_eq!(f[2].vertices[2], FaceVertex::new(2).with_normal(0));
        assert_eq!(
            f[3].vertices[2],
            FaceVertex::new(2).with_tex_coord(1).with_normal(0)
        );
    }

    #[test]
    fn test_negative_indices_are_relative() {
        let ctx = context_with(&[]);
        let model = parse_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf -4 -3 -2 -1\n", &ctx).unwrap();

        let positions: Vec<usize> = model.faces[0].vertices.iter().map(|v| v.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
        assert_eq!(model.faces[0].triangle_count(), 2);
    }

    #[test]
    fn test_invalid_indices_are_errors() {
        let ctx = context_with(&[]);
        for obj in ["v 0 0 0\nf 0 1 1\n", "v 0 0 0\nf -2 1 1\n", "v 0 0 0\nf a 1 1\n", "v 0 0 0\nf 1/1/1/1 1 1\n"] {
            let err = parse_str(obj, &ctx).unwrap_err();
            assert!(matches!(err, ObjError::Parse { line: 2, .. }), "{obj}: {err}");
        }
        assert!(matches!(
            parse_str("v 1 nan? 0\n", &ctx).unwrap_err(),
            ObjError::Parse { line: 1, .. }
        ));
    }

    #[test]
    fn test_faces_before_usemtl_use_default_material() {
        let ctx = context_with(&[]);
        let model = parse_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n", &ctx).unwrap();
        assert_eq!(model.materials.len(), 1);
        assert_eq!(model.materials[0].name, DEFAULT_MATERIAL);
        assert_eq!(model.materials[0].faces, vec![0]);
        assert_eq!(model.faces[0].vertices[0].color, WHITE_RGBA);
    }

    #[test]
    fn test_mtllib_and_usemtl() {
        let mtl = "newmtl hull\nKd 1 0 0\nmap_Kd hull.png\nmap_Bump hull_n.png\n\
                   newmtl glass\nKd 0 0 1\nd 0.5\nmap_Ks glass_s.png\n";
        let obj = "mtllib ship.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\n\
                   usemtl glass\nf 1 2 3\nusemtl hull\nf 3 2 1\nf 1 3 2\n";
        let ctx = context_with(&[("ship.mtl", mtl)]);
        let model = parse_str(obj, &ctx).unwrap();

        let names: Vec<&str> = model.materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["default", "hull", "glass"]);

        let hull = model.material("hull").unwrap();
        assert_eq!(hull.faces, vec![1, 2]);
        assert_eq!(hull.texture(TextureSlot::Diffuse), Some("hull.png"));
        assert_eq!(hull.texture(TextureSlot::Bump), Some("hull_n.png"));

        let glass = model.material("glass").unwrap();
        assert_eq!(glass.faces, vec![0]);
        assert_eq!(glass.texture(TextureSlot::Specular), Some("glass_s.png"));

        assert_eq!(model.faces[0].vertices[0].color, pack_rgba(0.0, 0.0, 1.0, 0.5));
        assert_eq!(model.faces[1].vertices[0].color, 0xFF00_00FF);
    }

    #[test]
    fn test_vertex_color_overrides_material() {
        let ctx = context_with(&[("m.mtl", "newmtl red\nKd 1 0 0\n")]);
        let obj = "mtllib m.mtl\nv 0 0 0 0 1 0\nv 1 0 0\nv 0 1 0\nusemtl red\nf 1 2 3\n";
        let model = parse_str(obj, &ctx).unwrap();

        let colors: Vec<u32> = model.faces[0].vertices.iter().map(|v| v.color).collect();
        assert_eq!(colors, vec![0x00FF_00FF, 0xFF00_00FF, 0xFF00_00FF]);
    }

    #[test]
    fn test_unknown_usemtl_appends_untextured_material() {
        let ctx = context_with(&[]);
        let model = parse_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl mystery\nf 1 2 3\n", &ctx).unwrap();
        let mystery = model.material("mystery").unwrap();
        assert_eq!(mystery.faces, vec![0]);
        assert!(TextureSlot::ALL.iter().all(|&s| mystery.texture(s).is_none()));
    }

    #[test]
    fn test_missing_mtllib_is_asset_error() {
        let ctx = context_with(&[]);
        let err = parse_str("mtllib gone.mtl\n", &ctx).unwrap_err();
        assert!(matches!(err, ObjError::Asset(AssetError::NoSuchResource { .. })));
    }

    #[test]
    fn test_malformed_mtllib_is_material_error() {
        let ctx = context_with(&[("bad.mtl", "newmtl m\nKd red\n")]);
        let err = parse_str("mtllib bad.mtl\n", &ctx).unwrap_err();
        match err {
            ObjError::Material { library, message } => {
                assert_eq!(library, "bad.mtl");
                assert!(message.contains("Line 2"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mtllib_with_several_libraries() {
        let ctx = context_with(&[("a.mtl", "newmtl a\n"), ("b.mtl", "newmtl b\n")]);
        let model = parse_str("mtllib a.mtl b.mtl\n", &ctx).unwrap();
        let names: Vec<&str> = model.materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["default", "a", "b"]);
    }

    #[test]
    fn test_load_through_context_base_path() {
        let archive = MemoryArchive::new();
        archive.insert("drone2/drone2.obj", b"mtllib drone2.mtl\nv 0 0 0\n".to_vec());
        archive.insert("drone2/drone2.mtl", b"newmtl body\n".to_vec());
        let resolver = Arc::new(AssetResolver::new());
        resolver.register(archive);

        let model = ObjLoader::load(&resolver.context("drone2"), "drone2.obj").unwrap();
        assert_eq!(model.positions.len(), 1);
        assert!(model.material("body").is_some());
    }
}
