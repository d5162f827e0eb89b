use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use gl;

use crate::{Error, Result};

/// An image decoded from disk and resident on the GPU. The GL object lives
/// as long as this value; entities only carry its raw name.
pub struct Texture {
    id: u32,
    size: [u32; 2],
}

impl Texture {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Texture> {
        let path = path.as_ref();

        let img = image::open(path)
            .map_err(|source| Error::Image {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();
        let (width, height) = img.dimensions();
        let raw = img.into_raw();

        let mut id: u32 = 0;

        unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as _,
                width as _,
                height as _,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                raw.as_ptr() as _,
            );

            // Pixel-art sampling: no filtering between atlas cells.
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as _);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as _);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as _);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as _);

            gl::BindTexture(gl::TEXTURE_2D, 0);
        }

        log::info!("loaded texture {} ({}x{})", path.display(), width, height);

        Ok(Texture {
            id,
            size: [width, height],
        })
    }

    /// Raw GL name, the opaque handle entities store.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn size(&self) -> [u32; 2] {
        self.size
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}

/// Path-keyed texture cache. Owns every `Texture` it loads for the lifetime
/// of the world that references them.
pub struct TextureBank {
    loaded: HashMap<PathBuf, Texture>,
}

impl TextureBank {
    pub fn new() -> TextureBank {
        TextureBank {
            loaded: HashMap::new(),
        }
    }

    /// Returns the handle for `path`, decoding and uploading on first use.
    pub fn fetch(&mut self, path: &Path) -> Result<u32> {
        match self.loaded.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.get().id()),
            Entry::Vacant(slot) => {
                let texture = Texture::from_file(path)?;
                Ok(slot.insert(texture).id())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}

impl Default for TextureBank {
    fn default() -> Self {
        TextureBank::new()
    }
}
