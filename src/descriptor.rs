//! The ambient "cube descriptor" shared by every operation in this crate.
//!
//! This mirrors the global `cube` structure of the original Espresso C
//! sources (see `expand.c`/`sparse.c` in the upstream distribution): a
//! process-wide, read-only-after-construction description of how parts are
//! grouped into variables. Unlike the C original, it is an explicit value
//! threaded through every call rather than a global -- see the "Ambient
//! descriptor" design note in the project's algorithm notes.

use crate::cube::RawCube;

/// One variable's contiguous range of parts.
///
/// A binary input variable has two parts (value-is-0, value-is-1); the
/// designated output variable has one part per output of the function, which
/// is how this crate (like upstream Espresso) represents multi-output covers
/// as a single multiple-valued variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable {
    pub first_part: usize,
    pub last_part: usize,
}

impl Variable {
    pub fn num_parts(&self) -> usize {
        self.last_part - self.first_part + 1
    }
}

/// Describes the variable partitioning shared by every cube in a
/// minimization: how many parts there are in total, which parts belong to
/// which variable, and which variable is the (multiple-valued) output.
///
/// Construct once per problem and share (by reference) across the ON-set,
/// DC-set and OFF-set covers; all three must agree on the same descriptor.
#[derive(Debug, Clone)]
pub struct CubeDescriptor {
    vars: Vec<Variable>,
    output: usize,
    size: usize,
    fullset: RawCube,
    emptyset: RawCube,
    var_mask: Vec<RawCube>,
}

impl CubeDescriptor {
    /// Build a descriptor from the number of parts of each input variable
    /// (almost always `2`, for a binary variable) plus the number of parts
    /// of the output variable (the number of outputs of the function).
    pub fn new(input_parts: &[usize], output_parts: usize) -> Self {
        assert!(output_parts > 0, "a function must have at least one output");
        let mut vars = Vec::with_capacity(input_parts.len() + 1);
        let mut next = 0usize;
        for &parts in input_parts {
            assert!(parts > 0, "a variable must have at least one part");
            vars.push(Variable {
                first_part: next,
                last_part: next + parts - 1,
            });
            next += parts;
        }
        let output = vars.len();
        vars.push(Variable {
            first_part: next,
            last_part: next + output_parts - 1,
        });
        next += output_parts;

        let size = next;
        let mut fullset = RawCube::empty(size);
        for i in 0..size {
            fullset.set_insert(i);
        }
        let emptyset = RawCube::empty(size);

        let var_mask = vars
            .iter()
            .map(|v| {
                let mut mask = RawCube::empty(size);
                for part in v.first_part..=v.last_part {
                    mask.set_insert(part);
                }
                mask
            })
            .collect();

        CubeDescriptor {
            vars,
            output,
            size,
            fullset,
            emptyset,
            var_mask,
        }
    }

    /// Total number of parts (bits) in a cube under this descriptor.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the designated (multiple-valued) output variable.
    pub fn output(&self) -> usize {
        self.output
    }

    /// Number of variables, inputs and output included.
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    pub fn var(&self, v: usize) -> Variable {
        self.vars[v]
    }

    pub fn first_part(&self, v: usize) -> usize {
        self.vars[v].first_part
    }

    pub fn last_part(&self, v: usize) -> usize {
        self.vars[v].last_part
    }

    /// The variable a given part belongs to.
    pub fn var_of_part(&self, part: usize) -> usize {
        self.vars
            .iter()
            .position(|v| part >= v.first_part && part <= v.last_part)
            .expect("part out of range")
    }

    pub fn fullset(&self) -> &RawCube {
        &self.fullset
    }

    pub fn emptyset(&self) -> &RawCube {
        &self.emptyset
    }

    /// The cube whose parts are exactly variable `v`'s parts.
    pub fn var_mask(&self, v: usize) -> &RawCube {
        &self.var_mask[v]
    }

    /// The cube whose parts are exactly the output variable's parts.
    pub fn output_mask(&self) -> &RawCube {
        &self.var_mask[self.output]
    }

    pub fn new_cube(&self) -> RawCube {
        RawCube::empty(self.size)
    }
}
