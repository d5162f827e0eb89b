use std::ffi::CString;
use std::ptr;

use gl::{self, types::*};
use glam::Mat4;

use crate::{Error, Result};

/// A linked GL program built from compiled stages.
pub struct Shader {
    id: u32,
    stages: Vec<ShaderStage>,
}

impl Shader {
    pub fn new() -> Shader {
        Shader {
            id: unsafe { gl::CreateProgram() },
            stages: Vec::new(),
        }
    }

    pub fn with_stage(mut self, stage: ShaderStage) -> Shader {
        unsafe {
            gl::AttachShader(self.id, stage.id);
        }
        self.stages.push(stage);
        self
    }

    pub fn build(self) -> Result<Shader> {
        unsafe {
            gl::LinkProgram(self.id);

            let mut link_status = gl::FALSE as GLint;
            gl::GetProgramiv(self.id, gl::LINK_STATUS, &mut link_status);

            if link_status != (gl::TRUE as GLint) {
                let mut log_len = 0;
                gl::GetProgramiv(self.id, gl::INFO_LOG_LENGTH, &mut log_len);

                let mut buf = Vec::with_capacity(log_len as usize);
                buf.set_len((log_len as usize) - 1);

                gl::GetProgramInfoLog(
                    self.id,
                    log_len,
                    ptr::null_mut(),
                    buf.as_mut_ptr() as *mut GLchar,
                );

                return Err(Error::ShaderLink(
                    String::from_utf8_lossy(&buf).into_owned(),
                ));
            }
        }

        Ok(self)
    }

    pub fn enable(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    fn get_loc<T: AsRef<str>>(&self, name: T) -> i32 {
        unsafe {
            let s = CString::new(name.as_ref()).unwrap();
            gl::GetUniformLocation(self.id, s.as_ptr())
        }
    }

    pub fn set_mat4<T: AsRef<str>>(&mut self, name: T, val: &Mat4) {
        unsafe {
            let loc = self.get_loc(name.as_ref());
            gl::UniformMatrix4fv(loc, 1, gl::FALSE, val.as_ref().as_ptr());
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

pub enum StageKind {
    Vertex,
    Fragment,
}

impl From<StageKind> for GLenum {
    fn from(kind: StageKind) -> Self {
        match kind {
            StageKind::Vertex => gl::VERTEX_SHADER,
            StageKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

pub struct ShaderStage {
    id: u32,
}

impl ShaderStage {
    pub fn new<S: AsRef<str>>(source: S, kind: StageKind) -> Result<ShaderStage> {
        let source = CString::new(source.as_ref().as_bytes()).unwrap();

        let id = unsafe {
            let id = gl::CreateShader(kind.into());
            gl::ShaderSource(id, 1, &source.as_ptr(), ptr::null());

            let mut compile_status = gl::FALSE as GLint;

            gl::CompileShader(id);
            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut compile_status);

            if compile_status != (gl::TRUE as GLint) {
                let mut log_len = 0;
                gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut log_len);

                let mut buf = Vec::with_capacity(log_len as usize);
                buf.set_len((log_len as usize) - 1);

                gl::GetShaderInfoLog(id, log_len, ptr::null_mut(), buf.as_mut_ptr() as *mut GLchar);

                return Err(Error::ShaderCompile(
                    String::from_utf8_lossy(&buf).into_owned(),
                ));
            }

            id
        };

        Ok(ShaderStage { id })
    }
}

impl Drop for ShaderStage {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}
