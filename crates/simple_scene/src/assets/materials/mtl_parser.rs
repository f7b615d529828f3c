//! MTL (Material Template Library) file parser
//!
//! Parses Wavefront .mtl files into structured data. Only the Phong color
//! terms and the texture maps the mesh subsets bind are kept.

use crate::foundation::math::{pack_rgba, Vec3};

/// Parsed MTL material data (Wavefront Phong model)
#[derive(Debug, Clone, PartialEq)]
pub struct MtlData {
    /// Material name
    pub name: String,
    /// Ambient color (Ka)
    pub ambient: Vec3,
    /// Diffuse color (Kd)
    pub diffuse: Vec3,
    /// Specular color (Ks)
    pub specular: Vec3,
    /// Specular exponent (Ns)
    pub specular_exponent: f32,
    /// Dissolve/opacity (d) - 0.0 = transparent, 1.0 = opaque
    pub dissolve: f32,
    /// Illumination model (illum) - 0-10
    pub illumination_model: u32,
    /// Diffuse texture map (map_Kd)
    pub diffuse_map: Option<String>,
    /// Specular texture map (map_Ks)
    pub specular_map: Option<String>,
    /// Ambient texture map (map_Ka)
    pub ambient_map: Option<String>,
    /// Bump map (map_Bump or bump)
    pub bump_map: Option<String>,
}

impl Default for MtlData {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Vec3::new(1.0, 1.0, 1.0),
            diffuse: Vec3::new(0.8, 0.8, 0.8),
            specular: Vec3::new(0.5, 0.5, 0.5),
            specular_exponent: 250.0,
            dissolve: 1.0,
            illumination_model: 2,
            diffuse_map: None,
            specular_map: None,
            ambient_map: None,
            bump_map: None,
        }
    }
}

impl MtlData {
    /// Diffuse color and dissolve packed as `0xRRGGBBAA`
    pub fn diffuse_rgba(&self) -> u32 {
        pack_rgba(self.diffuse.x, self.diffuse.y, self.diffuse.z, self.dissolve)
    }
}

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL file contents into materials, in declaration order
    ///
    /// A material redeclared later in the file replaces the earlier entry
    /// in place.
    pub fn parse(contents: &str) -> Result<Vec<MtlData>, String> {
        let mut materials: Vec<MtlData> = Vec::new();
        let mut current_material: Option<MtlData> = None;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let Some(command) = tokens.next() else {
                continue;
            };

            if command == "newmtl" {
                if let Some(mat) = current_material.take() {
                    Self::push_material(&mut materials, mat);
                }

                let name = tokens.next()
                    .ok_or_else(|| format!("Line {}: newmtl missing material name", line_num + 1))?
                    .to_string();
                current_material = Some(MtlData {
                    name,
                    ..Default::default()
                });
                continue;
            }

            // Statements before the first newmtl have nothing to apply to
            let Some(mat) = current_material.as_mut() else {
                continue;
            };

            match command {
                "Ka" => mat.ambient = Self::parse_vec3(&mut tokens, line_num, "Ka")?,
                "Kd" => mat.diffuse = Self::parse_vec3(&mut tokens, line_num, "Kd")?,
                "Ks" => mat.specular = Self::parse_vec3(&mut tokens, line_num, "Ks")?,
                "Ns" => mat.specular_exponent = Self::parse_f32(&mut tokens, line_num, "Ns")?,
                "d" => mat.dissolve = Self::parse_f32(&mut tokens, line_num, "d")?,
                "Tr" => {
                    // Transparency (inverted dissolve): Tr = 1.0 - d
                    let transparency = Self::parse_f32(&mut tokens, line_num, "Tr")?;
                    mat.dissolve = 1.0 - transparency;
                }
                "illum" => {
                    mat.illumination_model = Self::parse_u32(&mut tokens, line_num, "illum")?;
                }
                "map_Kd" => {
                    mat.diffuse_map = Some(Self::parse_texture_path(tokens, line_num, command)?);
                }
                "map_Ks" => {
                    mat.specular_map = Some(Self::parse_texture_path(tokens, line_num, command)?);
                }
                "map_Ka" => {
                    mat.ambient_map = Some(Self::parse_texture_path(tokens, line_num, command)?);
                }
                "map_Bump" | "map_bump" | "bump" => {
                    mat.bump_map = Some(Self::parse_texture_path(tokens, line_num, command)?);
                }
                // Ignore unknown commands silently
                _ => {}
            }
        }

        if let Some(mat) = current_material {
            Self::push_material(&mut materials, mat);
        }

        Ok(materials)
    }

    fn push_material(materials: &mut Vec<MtlData>, mat: MtlData) {
        if let Some(existing) = materials.iter_mut().find(|m| m.name == mat.name) {
            log::warn!("MTL material '{}' declared twice, keeping the later one", mat.name);
            *existing = mat;
        } else {
            materials.push(mat);
        }
    }

    /// Parse a Vec3 color from RGB tokens
    fn parse_vec3<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<Vec3, String>
    where
        I: Iterator<Item = &'a str>
    {
        let r = Self::parse_f32(tokens, line_num, command)?;
        let g = Self::parse_f32(tokens, line_num, command)?;
        let b = Self::parse_f32(tokens, line_num, command)?;
        Ok(Vec3::new(r, g, b))
    }

    /// Parse a single f32 value
    fn parse_f32<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<f32, String>
    where
        I: Iterator<Item = &'a str>
    {
        let token = tokens.next()
            .ok_or_else(|| format!("Line {}: {} missing value", line_num + 1, command))?;
        token.parse::<f32>()
            .map_err(|_| format!("Line {}: {} invalid float value '{}'", line_num + 1, command, token))
    }

    /// Parse a single u32 value
    fn parse_u32<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<u32, String>
    where
        I: Iterator<Item = &'a str>
    {
        let token = tokens.next()
            .ok_or_else(|| format!("Line {}: {} missing value", line_num + 1, command))?;
        token.parse::<u32>()
            .map_err(|_| format!("Line {}: {} invalid integer value '{}'", line_num + 1, command, token))
    }

    /// Parse texture file path (may contain spaces, take rest of line)
    ///
    /// Map options such as `-bm 1.0` before the file name are skipped.
    fn parse_texture_path<'a, I>(tokens: I, line_num: usize, command: &str) -> Result<String, String>
    where
        I: Iterator<Item = &'a str>
    {
        let mut tokens = tokens.peekable();
        while let Some(option) = tokens.next_if(|t| t.starts_with('-')) {
            let arg_count = match option {
                "-blendu" | "-blendv" | "-cc" | "-clamp" | "-imfchan" | "-texres" | "-bm"
                | "-boost" | "-type" => 1,
                "-mm" => 2,
                "-o" | "-s" | "-t" => 3,
                _ => 0,
            };
            for _ in 0..arg_count {
                tokens.next();
            }
        }

        let path: Vec<&str> = tokens.collect();
        if path.is_empty() {
            return Err(format!("Line {}: {} missing texture path", line_num + 1, command));
        }
        Ok(path.join(" "))
    }
}
