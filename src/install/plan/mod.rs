// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dependency-first install ordering.
//!
//! ```text
//! Utilla --> [Newtonsoft, ComputerInterface]
//! ComputerInterface --> [Newtonsoft]
//!
//! resolve(Utilla):
//!   visit Utilla
//!     visit Newtonsoft            --> step 1
//!     visit ComputerInterface
//!       Newtonsoft (planned)      --> edge only
//!                                 --> step 2
//!                                 --> step 3 (Utilla)
//! ```
//!
//! Every mod appears once, after all of its dependencies. A dependency that
//! is already on the current path is a cycle: the edge is dropped and logged.
//! The requesting mod, if any, is treated as already visited so a dependency
//! never re-triggers the mod that asked for it.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, warn};

use crate::registry::{ModDescriptor, ModRegistry};


/// One mod to install, in plan order.
#[derive(Debug, Clone)]
pub struct PlannedMod<'r> {
    pub descriptor: &'r ModDescriptor,
    /// The mod whose dependency list pulled this one in.
    pub requested_by: Option<&'r ModDescriptor>,
    /// Registry dependencies planned before this mod.
    pub dependencies: Vec<&'r str>,
    /// Dependencies absent from the registry.
    pub missing: Vec<&'r str>,
}

impl PlannedMod<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

/// A dependency edge dropped because it closes a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEdge {
    pub from: String,
    pub to: String,
}

impl fmt::Display for CycleEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' -> '{}'", self.from, self.to)
    }
}

/// Ordered install steps for one request.
#[derive(Debug, Clone)]
pub struct InstallPlan<'r> {
    steps: Vec<PlannedMod<'r>>,
    cycles: Vec<CycleEdge>,
}

impl<'r> InstallPlan<'r> {
    /// Plans `root` and its transitive dependencies.
    #[must_use]
    pub fn resolve(
        registry: &'r ModRegistry,
        root: &'r ModDescriptor,
        requesting: Option<&'r ModDescriptor>,
    ) -> Self {
        let mut planner = Planner {
            registry,
            visited: BTreeSet::new(),
            planned: BTreeSet::new(),
            path: Vec::new(),
            steps: Vec::new(),
            cycles: Vec::new(),
        };
        if let Some(requesting) = requesting {
            planner.visited.insert(requesting.name.as_str());
        }
        planner.visit(root, requesting);

        debug!(
            root = %root.name,
            order = ?planner.steps.iter().map(PlannedMod::name).collect::<Vec<_>>(),
            "install plan resolved"
        );

        Self {
            steps: planner.steps,
            cycles: planner.cycles,
        }
    }

    #[must_use]
    pub fn steps(&self) -> &[PlannedMod<'r>] {
        &self.steps
    }

    #[must_use]
    pub fn cycles(&self) -> &[CycleEdge] {
        &self.cycles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

struct Planner<'r> {
    registry: &'r ModRegistry,
    visited: BTreeSet<&'r str>,
    planned: BTreeSet<&'r str>,
    path: Vec<&'r str>,
    steps: Vec<PlannedMod<'r>>,
    cycles: Vec<CycleEdge>,
}

impl<'r> Planner<'r> {
    fn visit(&mut self, descriptor: &'r ModDescriptor, requested_by: Option<&'r ModDescriptor>) {
        let name = descriptor.name.as_str();
        self.visited.insert(name);
        self.path.push(name);

        let mut dependencies: Vec<&'r str> = Vec::new();
        let mut missing: Vec<&'r str> = Vec::new();

        for dep in &descriptor.dependencies {
            let dep = dep.as_str();
            if dependencies.contains(&dep) || missing.contains(&dep) {
                continue;
            }

            let Some(dep_descriptor) = self.registry.lookup(dep) else {
                missing.push(dep);
                continue;
            };

            if self.path.contains(&dep) {
                warn!(
                    "dependency cycle: '{name}' depends on '{dep}', which is already being installed; ignoring the edge"
                );
                self.cycles.push(CycleEdge {
                    from: name.to_string(),
                    to: dep.to_string(),
                });
                continue;
            }

            if self.planned.contains(dep) {
                dependencies.push(dep);
                continue;
            }

            if self.visited.contains(dep) {
                debug!(mod_name = %name, dependency = %dep, "skipping requesting mod");
                continue;
            }

            self.visit(dep_descriptor, Some(descriptor));
            dependencies.push(dep);
        }

        self.path.pop();
        self.planned.insert(name);
        self.steps.push(PlannedMod {
            descriptor,
            requested_by,
            dependencies,
            missing,
        });
    }
}
