use std::mem;
use std::ptr;

use gl::{self, types::*};

/// Unit quad as two triangles, matching the UV layout below vertex for vertex.
const QUAD_VERTICES: [GLfloat; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5,
    -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];

/// A region of a texture atlas in normalized UV coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasRect {
    pub u: f32,
    pub v: f32,
    pub w: f32,
    pub h: f32,
}

impl AtlasRect {
    /// The whole texture.
    pub const FULL: AtlasRect = AtlasRect {
        u: 0.0,
        v: 0.0,
        w: 1.0,
        h: 1.0,
    };

    /// Per-vertex UVs for the quad. The V axis is flipped (v + h at the
    /// bottom vertices) because atlases are laid out top-left-origin while
    /// GL samples bottom-left.
    pub fn uvs(&self) -> [GLfloat; 12] {
        [
            self.u, self.v + self.h,
            self.u + self.w, self.v + self.h,
            self.u + self.w, self.v,
            self.u, self.v + self.h,
            self.u + self.w, self.v,
            self.u, self.v,
        ]
    }
}

/// Maps an atlas cell index into its UV rectangle on a `cols` x `rows` grid,
/// row-major from the top-left cell.
pub fn atlas_rect(index: u32, cols: u32, rows: u32) -> AtlasRect {
    AtlasRect {
        u: (index % cols) as f32 / cols as f32,
        v: (index / cols) as f32 / rows as f32,
        w: 1.0 / cols as f32,
        h: 1.0 / rows as f32,
    }
}

/// The one quad every sprite draws with: a static position buffer and a UV
/// buffer rewritten per draw.
#[derive(Debug)]
pub struct SpriteQuad {
    vao: GLuint,
    vertex_vbo: GLuint,
    uv_vbo: GLuint,
}

impl SpriteQuad {
    pub fn new() -> SpriteQuad {
        let (mut vao, mut vertex_vbo, mut uv_vbo) = (0, 0, 0);

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            gl::GenBuffers(1, &mut vertex_vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, vertex_vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (QUAD_VERTICES.len() * mem::size_of::<GLfloat>()) as GLsizeiptr,
                QUAD_VERTICES.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
            gl::VertexAttribPointer(0, 2, gl::FLOAT, gl::FALSE, 0, ptr::null());
            gl::EnableVertexAttribArray(0);

            let full = AtlasRect::FULL.uvs();
            gl::GenBuffers(1, &mut uv_vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, uv_vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (full.len() * mem::size_of::<GLfloat>()) as GLsizeiptr,
                full.as_ptr() as *const _,
                gl::DYNAMIC_DRAW,
            );
            gl::VertexAttribPointer(1, 2, gl::FLOAT, gl::FALSE, 0, ptr::null());
            gl::EnableVertexAttribArray(1);

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        SpriteQuad {
            vao,
            vertex_vbo,
            uv_vbo,
        }
    }

    pub fn draw(&self, uvs: &[GLfloat; 12]) {
        unsafe {
            gl::BindVertexArray(self.vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, self.uv_vbo);
            gl::BufferSubData(
                gl::ARRAY_BUFFER,
                0,
                (uvs.len() * mem::size_of::<GLfloat>()) as GLsizeiptr,
                uvs.as_ptr() as *const _,
            );

            gl::DrawArrays(gl::TRIANGLES, 0, 6);

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for SpriteQuad {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vertex_vbo);
            gl::DeleteBuffers(1, &self.uv_vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}
