//! Simulation driver that sequences generations of a world.

use crate::lifeform::LifeformCatalog;
use crate::world::{TileVisitor, World};
use life_core::{Result, SimulationConfig};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

pub struct Simulation {
    world: World,
    catalog: LifeformCatalog,
    config: SimulationConfig,
    rng: ChaCha8Rng,
    generation: u64,
    reseeds: u64,
}

/// What happened during a single generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generation: u64,
    /// Cells reported to the visitor
    pub changes: usize,
    /// Live cells committed this generation
    pub population: usize,
    /// Whether the world was repopulated before drawing
    pub reseeded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub generations: u64,
    pub total_changes: u64,
    pub reseeds: u64,
    pub final_population: usize,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let world = World::from_config(&config.world, &mut rng)?;

        Ok(Self {
            world,
            catalog: LifeformCatalog::new(),
            config,
            rng,
            generation: 0,
            reseeds: 0,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reseed_count(&self) -> u64 {
        self.reseeds
    }

    /// Run one generation: reseed if dead, draw, commit, then compute the next frame.
    pub fn step<V: TileVisitor + ?Sized>(&mut self, visitor: &mut V) -> Result<GenerationReport> {
        let reseeded = self.world.is_dead();
        if reseeded {
            self.reseed()?;
        }

        let changes = self.world.draw_changes(visitor);
        self.world.save_frame();
        self.world.live_frame();
        self.generation += 1;

        let report = GenerationReport {
            generation: self.generation,
            changes,
            population: self.world.population(),
            reseeded,
        };
        trace!(?report, "Generation complete");

        if self.config.metrics_interval > 0 && self.generation % self.config.metrics_interval == 0 {
            info!(
                event = "population_metrics",
                generation = self.generation,
                population = report.population,
                changes = report.changes,
                reseeds = self.reseeds,
                "Population metrics snapshot"
            );
        }

        Ok(report)
    }

    /// Run the simulation for the specified number of generations
    #[instrument(skip(self, visitor))]
    pub fn run<V: TileVisitor + ?Sized>(
        &mut self,
        generations: u64,
        visitor: &mut V,
    ) -> Result<RunSummary> {
        let start = self.generation;
        let reseeds_before = self.reseeds;
        let mut total_changes = 0u64;

        for _ in 0..generations {
            let report = self.step(visitor)?;
            total_changes += report.changes as u64;
        }

        let summary = RunSummary {
            generations: self.generation - start,
            total_changes,
            reseeds: self.reseeds - reseeds_before,
            final_population: self.world.population(),
        };

        info!(
            event = "run_summary",
            generations = summary.generations,
            total_changes = summary.total_changes,
            reseeds = summary.reseeds,
            final_population = summary.final_population,
            "Run complete"
        );

        Ok(summary)
    }

    /// Repopulate the frame under construction with random cells and lifeforms.
    fn reseed(&mut self) -> Result<()> {
        let width = self.world.width();
        let height = self.world.height();

        for _ in 0..self.config.reseed.random_cells {
            let x = self.rng.gen_range(0..width);
            let y = self.rng.gen_range(0..height);
            self.world.set_entity(x, y, true)?;
        }

        let lifeforms = self.catalog.random(self.config.reseed.lifeforms, &mut self.rng);
        for lifeform in &lifeforms {
            if lifeform.width() > width || lifeform.height() > height {
                debug!(lifeform = lifeform.name(), "Lifeform does not fit, skipping");
                continue;
            }

            let x = self.rng.gen_range(0..=width - lifeform.width());
            let y = self.rng.gen_range(0..=height - lifeform.height());
            self.world.add_lifeform(x, y, lifeform)?;
        }

        self.reseeds += 1;
        debug!(
            generation = self.generation,
            random_cells = self.config.reseed.random_cells,
            lifeforms = lifeforms.len(),
            "Reseeded world"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_core::{Error, Position, ReseedConfig, Rule, WorldConfig};

    fn config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            seed: Some(seed),
            world: WorldConfig {
                width: 40,
                height: 20,
                rule: Rule::Extended,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::new(config(42)).unwrap();
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.reseed_count(), 0);
        assert_eq!(sim.world().width(), 40);
    }

    #[test]
    fn test_invalid_config() {
        let mut bad = config(1);
        bad.world.width = 0;
        assert!(matches!(
            Simulation::new(bad),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_first_step_reseeds_and_draws() {
        let mut sim = Simulation::new(config(42)).unwrap();

        let mut drawn = Vec::new();
        let report = sim
            .step(&mut |pos: Position, occupied: bool| drawn.push((pos, occupied)))
            .unwrap();

        assert!(report.reseeded);
        assert_eq!(report.generation, 1);
        assert_eq!(report.changes, drawn.len());
        assert!(drawn.iter().all(|&(_, occupied)| occupied));
        assert!(drawn.len() > 4);
        assert_eq!(sim.reseed_count(), 1);
    }

    #[test]
    fn test_drawn_cells_track_world() {
        let mut sim = Simulation::new(config(3)).unwrap();
        let mut screen = vec![false; 40 * 20];

        for _ in 0..25 {
            sim.step(&mut |pos: Position, occupied: bool| {
                screen[(pos.y * 40 + pos.x) as usize] = occupied;
            })
            .unwrap();

            // What was drawn is exactly what was committed
            for y in 0..20 {
                for x in 0..40 {
                    assert_eq!(
                        screen[(y * 40 + x) as usize],
                        sim.world().get_entity(x, y).unwrap()
                    );
                }
            }
        }
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let mut a = Simulation::new(config(1234)).unwrap();
        let mut b = Simulation::new(config(1234)).unwrap();

        let mut trace_a = Vec::new();
        let mut trace_b = Vec::new();
        a.run(30, &mut |pos: Position, occupied: bool| trace_a.push((pos, occupied)))
            .unwrap();
        b.run(30, &mut |pos: Position, occupied: bool| trace_b.push((pos, occupied)))
            .unwrap();

        assert_eq!(trace_a, trace_b);
        assert_eq!(a.world().draw_order(), b.world().draw_order());
    }

    #[test]
    fn test_dead_world_is_reseeded_again() {
        let mut config = config(5);
        // One cell never reaches the still-life threshold, so every generation reseeds
        config.reseed = ReseedConfig {
            random_cells: 1,
            lifeforms: 0,
        };

        let mut sim = Simulation::new(config).unwrap();
        let summary = sim.run(4, &mut |_: Position, _: bool| {}).unwrap();

        assert_eq!(summary.generations, 4);
        assert_eq!(summary.reseeds, 4);
        assert_eq!(summary.final_population, 1);
    }

    #[test]
    fn test_oversized_lifeforms_are_skipped() {
        let config = SimulationConfig {
            seed: Some(9),
            world: WorldConfig {
                width: 4,
                height: 4,
                rule: Rule::Extended,
            },
            reseed: ReseedConfig {
                random_cells: 0,
                lifeforms: 13,
            },
            metrics_interval: 0,
        };

        let mut sim = Simulation::new(config).unwrap();
        let report = sim.step(&mut |_: Position, _: bool| {}).unwrap();
        assert!(report.reseeded);
    }
}
