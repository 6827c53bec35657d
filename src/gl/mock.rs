//! Recording [`Gl`] implementation with no GPU behind it.
//!
//! `MockGl` hands out object names, keeps every live object in a table,
//! and records the calls it receives. Shader "compilation" succeeds for any
//! non-empty source; linking exposes every `in` declaration of the vertex
//! stage as an attribute and every `uniform` declaration as a uniform, in
//! declaration order. Binding a name that is not live raises
//! `GL_INVALID_OPERATION`, which is how use-after-delete shows up in tests.
//! The element buffer binding lives in the bound vertex array (or the
//! default one), and an indexed draw with no element buffer in effect is an
//! `GL_INVALID_OPERATION` too.

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
};

use super::{
    BufferTarget, BufferUsage, Gl, Primitive, ShaderStage, Viewport,
    INVALID_OPERATION, INVALID_VALUE, NO_ERROR,
};

/// Object name handed out by [`MockGl`]. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MockId(pub u32);

/// Uniform location handed out by [`MockGl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MockUniform {
    /// Program the location belongs to.
    pub program: MockId,
    /// Declaration index of the uniform.
    pub index: u32,
}

/// A state-changing or drawing call observed by [`MockGl`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// `glUseProgram`.
    UseProgram(Option<MockId>),
    /// `glBindBuffer`.
    BindBuffer(BufferTarget, Option<MockId>),
    /// `glBufferData` of `len` bytes.
    BufferData(BufferTarget, usize, BufferUsage),
    /// `glBindVertexArray`.
    BindVertexArray(Option<MockId>),
    /// `glEnableVertexAttribArray`.
    EnableAttrib(u32),
    /// `glDisableVertexAttribArray`.
    DisableAttrib(u32),
    /// `glVertexAttribPointer`.
    AttribPointer {
        /// Attribute index.
        index: u32,
        /// Components per vertex.
        size: i32,
        /// Byte stride.
        stride: i32,
        /// Byte offset.
        offset: i32,
    },
    /// `glUniform4fv`.
    Uniform4(Option<MockUniform>, [f32; 4]),
    /// `glUniformMatrix4fv`.
    UniformMatrix4(Option<MockUniform>, [f32; 16]),
    /// `glUniform1i`.
    Uniform1(Option<MockUniform>, i32),
    /// `glActiveTexture` unit index.
    ActiveTexture(u32),
    /// `glBindTexture(GL_TEXTURE_2D, ..)`.
    BindTexture(Option<MockId>),
    /// `GL_LINEAR` min and mag filter on the bound texture.
    LinearFiltering,
    /// `glTexImage2D` RGBA upload.
    TexImage {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// `glClearColor`.
    ClearColor([f32; 4]),
    /// `glClear(GL_COLOR_BUFFER_BIT)`.
    Clear,
    /// `glViewport`.
    Viewport(Viewport),
    /// `glDrawArrays`.
    DrawArrays {
        /// Primitive mode.
        mode: Primitive,
        /// First vertex.
        first: i32,
        /// Vertex count.
        count: i32,
    },
    /// `glDrawElements` with `u32` indices.
    DrawElements {
        /// Primitive mode.
        mode: Primitive,
        /// Index count.
        count: i32,
        /// Byte offset into the element buffer.
        offset: i32,
    },
}

struct MockShader {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Default)]
struct MockProgram {
    attached: Vec<MockId>,
    linked: bool,
    log: String,
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

#[derive(Default)]
struct MockState {
    next_name: u32,
    shaders: HashMap<MockId, MockShader>,
    programs: HashMap<MockId, MockProgram>,
    buffers: HashMap<MockId, usize>,
    /// Live vertex arrays and the element buffer each one captured.
    vertex_arrays: HashMap<MockId, Option<MockId>>,
    textures: HashMap<MockId, (u32, u32)>,
    array_buffer: Option<MockId>,
    /// Element binding of the default vertex array.
    element_buffer: Option<MockId>,
    vertex_array: Option<MockId>,
    texture_2d: Option<MockId>,
    errors: VecDeque<u32>,
    calls: Vec<Call>,
    stale_deletes: usize,
    fail_compile: Option<ShaderStage>,
    fail_link: bool,
    fail_create: bool,
    creations_left: Option<usize>,
}

impl MockState {
    fn alloc(&mut self) -> Result<MockId, String> {
        if self.fail_create {
            return Err("mock: object creation disabled".into());
        }
        if let Some(left) = self.creations_left.as_mut() {
            if *left == 0 {
                return Err("mock: object creation budget exhausted".into());
            }
            *left -= 1;
        }
        self.next_name += 1;
        Ok(MockId(self.next_name))
    }

    fn misuse(&mut self, what: &str, id: MockId) {
        log::debug!("mock gl: {what} on dead name {}", id.0);
        self.errors.push_back(INVALID_OPERATION);
    }

    fn stale_delete(&mut self, what: &str, id: MockId) {
        log::debug!("mock gl: delete of dead {what} {}", id.0);
        self.stale_deletes += 1;
    }

    fn bound_buffer(&self, target: BufferTarget) -> Option<MockId> {
        match target {
            BufferTarget::Array => self.array_buffer,
            BufferTarget::ElementArray => match self.vertex_array {
                Some(vao) => self.vertex_arrays.get(&vao).copied().flatten(),
                None => self.element_buffer,
            },
        }
    }

    fn bind_element_buffer(&mut self, buffer: Option<MockId>) {
        match self.vertex_array {
            Some(vao) => {
                if let Some(slot) = self.vertex_arrays.get_mut(&vao) {
                    *slot = buffer;
                }
            }
            None => self.element_buffer = buffer,
        }
    }
}

/// Names of `qualifier` declarations such as `uniform vec4 vColor;`.
fn declared_names(source: &str, qualifier: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| {
            let decl = line.trim().strip_suffix(';')?;
            let mut words = decl.split_whitespace();
            if !words.any(|w| w == qualifier) {
                return None;
            }
            decl.split_whitespace().last().map(str::to_owned)
        })
        .collect()
}

/// In-memory [`Gl`] driver for tests and headless runs.
#[derive(Default)]
pub struct MockGl {
    state: RefCell<MockState>,
}

impl MockGl {
    /// A fresh driver with no live objects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make compilation of the next shader of `stage` fail.
    pub fn fail_compile(&self, stage: ShaderStage) {
        self.state.borrow_mut().fail_compile = Some(stage);
    }

    /// Make the next link fail.
    pub fn fail_link(&self) {
        self.state.borrow_mut().fail_link = true;
    }

    /// Make every object-creating call fail until re-enabled.
    pub fn set_fail_create(&self, fail: bool) {
        self.state.borrow_mut().fail_create = fail;
    }

    /// Let `count` more objects be created, then fail every creation.
    pub fn fail_create_after(&self, count: usize) {
        self.state.borrow_mut().creations_left = Some(count);
    }

    /// Queue an error code for `get_error` to report.
    pub fn raise_error(&self, code: u32) {
        self.state.borrow_mut().errors.push_back(code);
    }

    /// Live shader objects.
    #[must_use]
    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    /// Live program objects.
    #[must_use]
    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    /// Live buffer objects.
    #[must_use]
    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    /// Live vertex array objects.
    #[must_use]
    pub fn live_vertex_arrays(&self) -> usize {
        self.state.borrow().vertex_arrays.len()
    }

    /// Live texture objects.
    #[must_use]
    pub fn live_textures(&self) -> usize {
        self.state.borrow().textures.len()
    }

    /// Sum of every live object count.
    #[must_use]
    pub fn live_objects(&self) -> usize {
        self.live_shaders()
            + self.live_programs()
            + self.live_buffers()
            + self.live_vertex_arrays()
            + self.live_textures()
    }

    /// Deletions that named an object which was not live.
    #[must_use]
    pub fn stale_deletes(&self) -> usize {
        self.state.borrow().stale_deletes
    }

    /// Bytes last uploaded into `buffer`, if it is live.
    #[must_use]
    pub fn buffer_len(&self, buffer: MockId) -> Option<usize> {
        self.state.borrow().buffers.get(&buffer).copied()
    }

    /// Dimensions last uploaded into `texture`, if it is live.
    #[must_use]
    pub fn texture_size(&self, texture: MockId) -> Option<(u32, u32)> {
        self.state.borrow().textures.get(&texture).copied()
    }

    /// Every recorded call, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Forget recorded calls, keeping objects alive.
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Number of recorded draw calls (array or indexed).
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::DrawArrays { .. } | Call::DrawElements { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl Gl for MockGl {
    type Shader = MockId;
    type Program = MockId;
    type Buffer = MockId;
    type VertexArray = MockId;
    type Texture = MockId;
    type UniformLocation = MockUniform;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        let mut st = self.state.borrow_mut();
        let id = st.alloc()?;
        let _ = st.shaders.insert(
            id,
            MockShader {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
            },
        );
        Ok(id)
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        let mut st = self.state.borrow_mut();
        match st.shaders.get_mut(&shader) {
            Some(s) => source.clone_into(&mut s.source),
            None => st.misuse("shader_source", shader),
        }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        let mut guard = self.state.borrow_mut();
        let st = &mut *guard;
        let forced = st.fail_compile;
        let Some(s) = st.shaders.get_mut(&shader) else {
            st.misuse("compile_shader", shader);
            return;
        };
        if forced == Some(s.stage) {
            s.compiled = false;
            s.log = format!("0:1: mock {} compile failure", s.stage);
            st.fail_compile = None;
        } else if s.source.trim().is_empty() {
            s.compiled = false;
            s.log = "0:0: empty shader source".into();
        } else {
            s.compiled = true;
            s.log.clear();
        }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|s| s.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: Self::Shader) {
        let mut st = self.state.borrow_mut();
        if st.shaders.remove(&shader).is_none() {
            st.stale_delete("shader", shader);
        }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        let mut st = self.state.borrow_mut();
        let id = st.alloc()?;
        let _ = st.programs.insert(id, MockProgram::default());
        Ok(id)
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        let mut st = self.state.borrow_mut();
        if !st.shaders.contains_key(&shader) {
            st.misuse("attach_shader", shader);
            return;
        }
        match st.programs.get_mut(&program) {
            Some(p) => p.attached.push(shader),
            None => st.misuse("attach_shader", program),
        }
    }

    fn link_program(&self, program: Self::Program) {
        let mut guard = self.state.borrow_mut();
        let st = &mut *guard;
        let forced = std::mem::take(&mut st.fail_link);
        let Some(p) = st.programs.get(&program) else {
            st.misuse("link_program", program);
            return;
        };

        let mut attributes = Vec::new();
        let mut uniforms = Vec::new();
        let mut stages = Vec::new();
        let mut failure = forced.then(|| "mock link failure".to_owned());
        for id in &p.attached {
            match st.shaders.get(id) {
                Some(s) if s.compiled => {
                    stages.push(s.stage);
                    if s.stage == ShaderStage::Vertex {
                        attributes.extend(declared_names(&s.source, "in"));
                        attributes.extend(declared_names(&s.source, "attribute"));
                    }
                    for name in declared_names(&s.source, "uniform") {
                        if !uniforms.contains(&name) {
                            uniforms.push(name);
                        }
                    }
                }
                _ => failure = Some(format!("attached shader {} not compiled", id.0)),
            }
        }
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            if !stages.contains(&stage) {
                failure = Some(format!("missing {stage} shader"));
            }
        }

        if let Some(p) = st.programs.get_mut(&program) {
            p.linked = failure.is_none();
            p.log = failure.unwrap_or_default();
            p.attributes = attributes;
            p.uniforms = uniforms;
        }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn use_program(&self, program: Option<Self::Program>) {
        let mut st = self.state.borrow_mut();
        if let Some(id) = program {
            if !st.programs.contains_key(&id) {
                st.misuse("use_program", id);
            }
        }
        st.calls.push(Call::UseProgram(program));
    }

    fn delete_program(&self, program: Self::Program) {
        let mut st = self.state.borrow_mut();
        if st.programs.remove(&program).is_none() {
            st.stale_delete("program", program);
        }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        let st = self.state.borrow();
        let p = st.programs.get(&program).filter(|p| p.linked)?;
        p.attributes
            .iter()
            .position(|a| a == name)
            .map(|i| i as u32)
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        let st = self.state.borrow();
        let p = st.programs.get(&program).filter(|p| p.linked)?;
        p.uniforms
            .iter()
            .position(|u| u == name)
            .map(|i| MockUniform {
                program,
                index: i as u32,
            })
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        let mut st = self.state.borrow_mut();
        let id = st.alloc()?;
        let _ = st.buffers.insert(id, 0);
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>) {
        let mut st = self.state.borrow_mut();
        if let Some(id) = buffer {
            if !st.buffers.contains_key(&id) {
                st.misuse("bind_buffer", id);
            }
        }
        match target {
            BufferTarget::Array => st.array_buffer = buffer,
            BufferTarget::ElementArray => st.bind_element_buffer(buffer),
        }
        st.calls.push(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        let mut st = self.state.borrow_mut();
        match st.bound_buffer(target) {
            Some(id) => {
                if let Some(len) = st.buffers.get_mut(&id) {
                    *len = data.len();
                }
            }
            None => st.errors.push_back(INVALID_OPERATION),
        }
        st.calls.push(Call::BufferData(target, data.len(), usage));
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        let mut st = self.state.borrow_mut();
        if st.buffers.remove(&buffer).is_none() {
            st.stale_delete("buffer", buffer);
        }
        if st.array_buffer == Some(buffer) {
            st.array_buffer = None;
        }
        if st.element_buffer == Some(buffer) {
            st.element_buffer = None;
        }
        for captured in st.vertex_arrays.values_mut() {
            if *captured == Some(buffer) {
                *captured = None;
            }
        }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        let mut st = self.state.borrow_mut();
        let id = st.alloc()?;
        let _ = st.vertex_arrays.insert(id, None);
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        let mut st = self.state.borrow_mut();
        match vertex_array {
            Some(id) if !st.vertex_arrays.contains_key(&id) => {
                st.misuse("bind_vertex_array", id);
                st.vertex_array = None;
            }
            _ => st.vertex_array = vertex_array,
        }
        st.calls.push(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        let mut st = self.state.borrow_mut();
        if st.vertex_arrays.remove(&vertex_array).is_none() {
            st.stale_delete("vertex array", vertex_array);
        }
        if st.vertex_array == Some(vertex_array) {
            st.vertex_array = None;
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableAttrib(index));
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::DisableAttrib(index));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32) {
        self.record(Call::AttribPointer {
            index,
            size,
            stride,
            offset,
        });
    }

    fn uniform_4_f32(&self, location: Option<&Self::UniformLocation>, value: &[f32; 4]) {
        self.record(Call::Uniform4(location.copied(), *value));
    }

    fn uniform_matrix_4_f32(
        &self,
        location: Option<&Self::UniformLocation>,
        value: &[f32; 16],
    ) {
        self.record(Call::UniformMatrix4(location.copied(), *value));
    }

    fn uniform_1_i32(&self, location: Option<&Self::UniformLocation>, value: i32) {
        self.record(Call::Uniform1(location.copied(), value));
    }

    fn create_texture(&self) -> Result<Self::Texture, String> {
        let mut st = self.state.borrow_mut();
        let id = st.alloc()?;
        let _ = st.textures.insert(id, (0, 0));
        Ok(id)
    }

    fn active_texture(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn bind_texture_2d(&self, texture: Option<Self::Texture>) {
        let mut st = self.state.borrow_mut();
        if let Some(id) = texture {
            if !st.textures.contains_key(&id) {
                st.misuse("bind_texture", id);
            }
        }
        st.texture_2d = texture;
        st.calls.push(Call::BindTexture(texture));
    }

    fn texture_2d_linear_filtering(&self) {
        self.record(Call::LinearFiltering);
    }

    fn tex_image_2d_rgba(&self, width: u32, height: u32, pixels: &[u8]) {
        let mut st = self.state.borrow_mut();
        let expected = width as usize * height as usize * 4;
        if pixels.len() < expected {
            st.errors.push_back(INVALID_VALUE);
        } else if let Some(id) = st.texture_2d {
            if let Some(size) = st.textures.get_mut(&id) {
                *size = (width, height);
            }
        }
        st.calls.push(Call::TexImage { width, height });
    }

    fn delete_texture(&self, texture: Self::Texture) {
        let mut st = self.state.borrow_mut();
        if st.textures.remove(&texture).is_none() {
            st.stale_delete("texture", texture);
        }
        if st.texture_2d == Some(texture) {
            st.texture_2d = None;
        }
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.record(Call::ClearColor(rgba));
    }

    fn clear_color_buffer(&self) {
        self.record(Call::Clear);
    }

    fn viewport(&self, viewport: Viewport) {
        self.record(Call::Viewport(viewport));
    }

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32) {
        self.record(Call::DrawArrays { mode, first, count });
    }

    fn draw_elements_u32(&self, mode: Primitive, count: i32, offset: i32) {
        let mut st = self.state.borrow_mut();
        if st.bound_buffer(BufferTarget::ElementArray).is_none() {
            log::debug!("mock gl: draw_elements with no element buffer");
            st.errors.push_back(INVALID_OPERATION);
        }
        st.calls.push(Call::DrawElements {
            mode,
            count,
            offset,
        });
    }

    fn get_error(&self) -> u32 {
        self.state.borrow_mut().errors.pop_front().unwrap_or(NO_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = "#version 300 es\nin vec4 aPosition;\nin vec2 aTexCoord;\nuniform mat4 uTMatrix;\nvoid main() {}\n";
    const FS: &str = "#version 300 es\nprecision mediump float;\nuniform sampler2D uSampler;\nout vec4 fragColor;\nvoid main() {}\n";

    fn linked(gl: &MockGl) -> MockId {
        let vs = gl.create_shader(ShaderStage::Vertex).unwrap();
        gl.shader_source(vs, VS);
        gl.compile_shader(vs);
        let fs = gl.create_shader(ShaderStage::Fragment).unwrap();
        gl.shader_source(fs, FS);
        gl.compile_shader(fs);
        let p = gl.create_program().unwrap();
        gl.attach_shader(p, vs);
        gl.attach_shader(p, fs);
        gl.link_program(p);
        p
    }

    #[test]
    fn declared_names_skip_outputs_and_locals() {
        assert_eq!(declared_names(VS, "in"), vec!["aPosition", "aTexCoord"]);
        assert_eq!(declared_names(FS, "uniform"), vec!["uSampler"]);
        assert!(declared_names(FS, "in").is_empty());
    }

    #[test]
    fn link_exposes_interface() {
        let gl = MockGl::new();
        let p = linked(&gl);
        assert!(gl.program_link_status(p));
        assert_eq!(gl.attrib_location(p, "aPosition"), Some(0));
        assert_eq!(gl.attrib_location(p, "aTexCoord"), Some(1));
        assert_eq!(gl.attrib_location(p, "missing"), None);
        assert_eq!(
            gl.uniform_location(p, "uSampler"),
            Some(MockUniform { program: p, index: 1 })
        );
    }

    #[test]
    fn binding_deleted_buffer_raises_invalid_operation() {
        let gl = MockGl::new();
        let b = gl.create_buffer().unwrap();
        gl.delete_buffer(b);
        assert_eq!(gl.live_buffers(), 0);
        gl.bind_buffer(BufferTarget::Array, Some(b));
        assert_eq!(gl.get_error(), INVALID_OPERATION);
        assert_eq!(gl.get_error(), NO_ERROR);
    }

    #[test]
    fn double_delete_is_counted() {
        let gl = MockGl::new();
        let t = gl.create_texture().unwrap();
        gl.delete_texture(t);
        gl.delete_texture(t);
        assert_eq!(gl.stale_deletes(), 1);
    }

    #[test]
    fn buffer_data_without_binding_is_an_error() {
        let gl = MockGl::new();
        gl.buffer_data(BufferTarget::Array, &[0; 12], BufferUsage::StaticDraw);
        assert_eq!(gl.get_error(), INVALID_OPERATION);
    }

    #[test]
    fn creation_failure_hands_out_nothing() {
        let gl = MockGl::new();
        gl.set_fail_create(true);
        assert!(gl.create_buffer().is_err());
        gl.set_fail_create(false);
        assert!(gl.create_buffer().is_ok());
        assert_eq!(gl.live_buffers(), 1);
    }

    #[test]
    fn element_binding_is_vertex_array_state() {
        let gl = MockGl::new();
        let ebo = gl.create_buffer().unwrap();
        let vao = gl.create_vertex_array().unwrap();

        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(BufferTarget::ElementArray, Some(ebo));
        gl.bind_vertex_array(None);
        gl.draw_elements_u32(Primitive::Triangles, 3, 0);
        assert_eq!(gl.get_error(), INVALID_OPERATION);

        gl.bind_vertex_array(Some(vao));
        gl.draw_elements_u32(Primitive::Triangles, 3, 0);
        assert_eq!(gl.get_error(), NO_ERROR);
    }

    #[test]
    fn unbinding_inside_vertex_array_drops_capture() {
        let gl = MockGl::new();
        let ebo = gl.create_buffer().unwrap();
        let vao = gl.create_vertex_array().unwrap();
        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(BufferTarget::ElementArray, Some(ebo));
        gl.bind_buffer(BufferTarget::ElementArray, None);
        gl.draw_elements_u32(Primitive::Triangles, 3, 0);
        assert_eq!(gl.get_error(), INVALID_OPERATION);
    }

    #[test]
    fn creation_budget_runs_out() {
        let gl = MockGl::new();
        gl.fail_create_after(1);
        assert!(gl.create_texture().is_ok());
        assert!(gl.create_texture().is_err());
    }
}
