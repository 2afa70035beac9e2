use std::collections::HashMap;

use raymarch_shader::prelude::{ShaderProgram, UniformLocation, UniformValue};

/// Stand-in for a compiled GPU program.
///
/// Every `uniform` declared in the source gets a location in declaration order, and writes are
/// recorded instead of reaching a GPU.
#[derive(Debug, Default)]
pub struct RecordingProgram {
    names: Vec<String>,
    locations: HashMap<String, UniformLocation>,
    writes: Vec<(UniformLocation, UniformValue)>,
}

impl RecordingProgram {
    /// "Compiles" `source` by collecting its top-level `uniform` declarations.
    pub fn compile(source: &str) -> Self {
        let mut program = Self::default();
        for line in source.lines() {
            let mut words = line.trim().trim_end_matches(';').split_whitespace();
            if words.next() != Some("uniform") {
                continue;
            }
            if let Some(name) = words.nth(1) {
                let location = UniformLocation(program.names.len() as i32);
                program.locations.insert(name.to_string(), location);
                program.names.push(name.to_string());
            }
        }
        program
    }

    pub fn uniform_count(&self) -> usize {
        self.names.len()
    }

    /// Recorded writes since the last call, with uniform names resolved.
    pub fn take_writes(&mut self) -> Vec<(String, UniformValue)> {
        self.writes
            .drain(..)
            .map(|(location, value)| {
                let name = usize::try_from(location.0)
                    .ok()
                    .and_then(|i| self.names.get(i))
                    .cloned()
                    .unwrap_or_else(|| format!("<{}>", location.0));
                (name, value)
            })
            .collect()
    }
}

impl ShaderProgram for RecordingProgram {
    fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.locations.get(name).copied()
    }

    fn set_uniform(&mut self, location: UniformLocation, value: &UniformValue) {
        self.writes.push((location, *value));
    }
}
