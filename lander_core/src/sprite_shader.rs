use crate::shader::{Shader, ShaderStage, StageKind};
use crate::Result;

const SPRITE_VERT_SHADER: &str = r"
#version 330 core
layout (location = 0) in vec2 pos_in;
layout (location = 1) in vec2 uv_in;

uniform mat4 model;
uniform mat4 view;
uniform mat4 projection;

out vec2 uv;

void main() {
    gl_Position = projection * view * model * vec4(pos_in, 0.0, 1.0);
    uv = uv_in;
}
";

const SPRITE_FRAG_SHADER: &str = r"
#version 330 core

in vec2 uv;

out vec4 color;

uniform sampler2D sampler;

void main() {
    color = texture(sampler, uv);
}
";

pub fn get_sprite_shader() -> Result<Shader> {
    Shader::new()
        .with_stage(ShaderStage::new(SPRITE_VERT_SHADER, StageKind::Vertex)?)
        .with_stage(ShaderStage::new(SPRITE_FRAG_SHADER, StageKind::Fragment)?)
        .build()
}
