use std::fmt;
use std::path::{Path, PathBuf};

use crate::assets::image::{DecodedImage, decode as decode_image};
use crate::device::{Gpu, NO_ID, RawId};
use crate::error::{Error, Result};
use crate::resource::{TextureDeleter, TextureHandle};

/// Minification / magnification filter.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Filter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    /// `LINEAR_MIPMAP_LINEAR`.
    Trilinear,
}

impl Filter {
    pub fn gl(self) -> i32 {
        (match self {
            Self::Nearest => glow::NEAREST,
            Self::Linear => glow::LINEAR,
            Self::NearestMipmapNearest => glow::NEAREST_MIPMAP_NEAREST,
            Self::LinearMipmapNearest => glow::LINEAR_MIPMAP_NEAREST,
            Self::NearestMipmapLinear => glow::NEAREST_MIPMAP_LINEAR,
            Self::Trilinear => glow::LINEAR_MIPMAP_LINEAR,
        }) as i32
    }
}

/// Texture coordinate wrap mode (applied to both S and T).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Wrap {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    ClampToBorder,
}

impl Wrap {
    pub fn gl(self) -> i32 {
        (match self {
            Self::Repeat => glow::REPEAT,
            Self::MirroredRepeat => glow::MIRRORED_REPEAT,
            Self::ClampToEdge => glow::CLAMP_TO_EDGE,
            Self::ClampToBorder => glow::CLAMP_TO_BORDER,
        }) as i32
    }
}

/// Upload and sampling options for [`Texture::load`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextureOptions {
    /// Flip rows so `v = 0` is the bottom of the image.
    pub flip: bool,
    /// Store 3/4-channel images as sRGB so sampling returns linear values.
    pub srgb: bool,
    pub gen_mipmaps: bool,
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub wrap: Wrap,
    /// Max anisotropy; values `<= 1.0` leave the driver default.
    pub anisotropy: f32,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            flip: true,
            srgb: false,
            gen_mipmaps: true,
            min_filter: Filter::Trilinear,
            mag_filter: Filter::Linear,
            wrap: Wrap::Repeat,
            anisotropy: 8.0,
        }
    }
}

/// `(internal format, pixel format)` for a channel count.
fn formats(channels: u8, srgb: bool) -> (u32, u32) {
    match (channels, srgb) {
        (1, _) => (glow::R8, glow::RED),
        (2, _) => (glow::RG8, glow::RG),
        (3, false) => (glow::RGB8, glow::RGB),
        (3, true) => (glow::SRGB8, glow::RGB),
        (_, false) => (glow::RGBA8, glow::RGBA),
        (_, true) => (glow::SRGB8_ALPHA8, glow::RGBA),
    }
}

/// Channel remap so gray and gray+alpha images sample as `(v, v, v, a)`.
fn swizzle(channels: u8) -> Option<[i32; 4]> {
    let (r, g, one) = (glow::RED as i32, glow::GREEN as i32, glow::ONE as i32);
    match channels {
        1 => Some([r, r, r, one]),
        2 => Some([r, r, r, g]),
        _ => None,
    }
}

/// A 2D texture uploaded once from an image file.
pub struct Texture {
    handle: TextureHandle,
    path: PathBuf,
    width: u32,
    height: u32,
    channels: u8,
}

impl Texture {
    /// Decodes `path` and uploads it.
    pub fn load(gpu: &Gpu, path: impl AsRef<Path>, options: &TextureOptions) -> Result<Self> {
        let path = path.as_ref();
        let image = decode_image(path, options.flip)?;
        let texture = Self::from_image(gpu, &image, options, path)?;
        log::debug!(
            "loaded texture {} ({}x{}, {} ch)",
            path.display(),
            image.width,
            image.height,
            image.channels
        );
        Ok(texture)
    }

    /// Uploads already decoded pixels. `path` is only recorded for display.
    ///
    /// Fails with `Error::Decode` unless `channels` is 1 to 4 and `pixels`
    /// holds exactly `width * height * channels` bytes.
    pub fn from_image(
        gpu: &Gpu,
        image: &DecodedImage,
        options: &TextureOptions,
        path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let path = path.into();
        if !(1..=4).contains(&image.channels) {
            return Err(Error::decode(path, format!("unsupported channel count {}", image.channels)));
        }
        let expected = (image.width as u64) * (image.height as u64) * (image.channels as u64);
        if image.pixels.len() as u64 != expected {
            return Err(Error::decode(
                path,
                format!(
                    "{}x{}x{} image needs {expected} bytes, got {}",
                    image.width,
                    image.height,
                    image.channels,
                    image.pixels.len()
                ),
            ));
        }

        let id = gpu.create_texture().map_err(|message| Error::Resource {
            kind: "texture",
            message,
        })?;
        let handle = TextureHandle::new(id, TextureDeleter(gpu.clone()));

        let (internal, format) = formats(image.channels, options.srgb);

        gpu.bind_texture_2d(id);
        gpu.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        gpu.tex_image_2d(
            internal as i32,
            image.width as i32,
            image.height as i32,
            format,
            &image.pixels,
        );

        if options.gen_mipmaps {
            gpu.generate_mipmap_2d();
        }
        gpu.tex_parameter_i32(glow::TEXTURE_WRAP_S, options.wrap.gl());
        gpu.tex_parameter_i32(glow::TEXTURE_WRAP_T, options.wrap.gl());
        gpu.tex_parameter_i32(glow::TEXTURE_MIN_FILTER, options.min_filter.gl());
        gpu.tex_parameter_i32(glow::TEXTURE_MAG_FILTER, options.mag_filter.gl());
        if options.anisotropy > 1.0 {
            gpu.tex_parameter_f32(glow::TEXTURE_MAX_ANISOTROPY_EXT, options.anisotropy);
        }
        if let Some(mask) = swizzle(image.channels) {
            gpu.tex_parameter_i32_slice(glow::TEXTURE_SWIZZLE_RGBA, &mask);
        }

        Ok(Self {
            handle,
            path,
            width: image.width,
            height: image.height,
            channels: image.channels,
        })
    }

    /// Activates texture unit `unit` and binds this texture to it.
    pub fn bind(&self, unit: u32) {
        let gpu = &self.handle.deleter().0;
        gpu.active_texture(unit);
        gpu.bind_texture_2d(self.handle.id());
    }

    /// Writes an integer parameter directly. Binds the texture first.
    pub fn set_param_i32(&self, pname: u32, value: i32) {
        let gpu = &self.handle.deleter().0;
        gpu.bind_texture_2d(self.handle.id());
        gpu.tex_parameter_i32(pname, value);
    }

    /// Writes a float parameter directly. Binds the texture first.
    pub fn set_param_f32(&self, pname: u32, value: f32) {
        let gpu = &self.handle.deleter().0;
        gpu.bind_texture_2d(self.handle.id());
        gpu.tex_parameter_f32(pname, value);
    }

    pub fn id(&self) -> RawId {
        self.handle.id()
    }

    /// Whether the handle holds no GPU object. Textures built by `load` and
    /// `from_image` always hold one; use [`TextureSlot::is_empty`] for
    /// optional textures.
    pub fn is_empty(&self) -> bool {
        self.handle.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.handle.id())
            .field("path", &self.path)
            .field("size", &(self.width, self.height))
            .field("channels", &self.channels)
            .finish()
    }
}

impl fmt::Display for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Texture {{ {}: {} }}", self.handle.id(), self.path.display())
    }
}

/// An optional texture: a material slot either holds a texture or nothing.
#[derive(Debug, Default)]
pub enum TextureSlot {
    #[default]
    Empty,
    Loaded(Texture),
}

impl TextureSlot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn texture(&self) -> Option<&Texture> {
        match self {
            Self::Empty => None,
            Self::Loaded(t) => Some(t),
        }
    }

    /// Binds the texture to `unit`, or unbinds the unit for an empty slot.
    pub fn bind(&self, gpu: &Gpu, unit: u32) {
        match self {
            Self::Loaded(t) => t.bind(unit),
            Self::Empty => {
                gpu.active_texture(unit);
                gpu.bind_texture_2d(NO_ID);
            }
        }
    }
}

impl From<Texture> for TextureSlot {
    fn from(t: Texture) -> Self {
        Self::Loaded(t)
    }
}

impl fmt::Display for TextureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Texture { 0 }"),
            Self::Loaded(t) => t.fmt(f),
        }
    }
}
