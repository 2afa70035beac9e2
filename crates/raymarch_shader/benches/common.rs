#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use criterion::{Criterion, Throughput};
use raymarch_shader::prelude::{ShaderProgram, UniformLocation, UniformValue};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Program that accepts every declared uniform and counts writes.
#[derive(Default)]
pub struct CountingProgram {
    locations: HashMap<String, UniformLocation>,
    pub writes: usize,
}

impl CountingProgram {
    pub fn from_declarations(decls: &str) -> Self {
        let locations = decls
            .lines()
            .filter_map(|line| line.trim_end_matches(';').split_whitespace().nth(2))
            .enumerate()
            .map(|(i, name)| (name.to_string(), UniformLocation(i as i32)))
            .collect();
        Self {
            locations,
            writes: 0,
        }
    }
}

impl ShaderProgram for CountingProgram {
    fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.locations.get(name).copied()
    }

    fn set_uniform(&mut self, _location: UniformLocation, _value: &UniformValue) {
        self.writes += 1;
    }
}
