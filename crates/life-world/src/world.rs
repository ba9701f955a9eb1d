//! Double-buffered Game of Life world.
//!
//! A [`World`] holds two frames. `previous` is the last committed generation
//! and the only state visible through [`World::get_entity`]; `next` is the
//! generation under construction and the only target of
//! [`World::set_entity`]. A generation is driven in this order:
//!
//! 1. stamp or seed cells into `next` ([`World::add_lifeform`], [`World::set_entity`])
//! 2. report the difference with [`World::draw_changes`]
//! 3. commit it with [`World::save_frame`]
//! 4. compute the following `next` with [`World::live_frame`]
//!
//! Swapping steps 2 and 3 loses the diff, since both frames agree after a commit.

use crate::frame::Frame;
use crate::lifeform::Lifeform;
use life_core::{Error, Position, Result, Rule, WorldConfig};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

/// Minimum population of a stable still life; anything at or below is treated as dead.
const DEAD_POPULATION: usize = 4;

/// Receives one call per cell that changed between `previous` and `next`.
pub trait TileVisitor {
    fn visit(&mut self, position: Position, occupied: bool);
}

impl<F> TileVisitor for F
where
    F: FnMut(Position, bool),
{
    fn visit(&mut self, position: Position, occupied: bool) {
        self(position, occupied)
    }
}

pub struct World {
    previous: Frame,
    next: Frame,
    draw_order: Vec<Position>,
    rule: Rule,
}

impl World {
    pub fn new<R: Rng + ?Sized>(width: i32, height: i32, rng: &mut R) -> Result<Self> {
        Self::with_rule(width, height, Rule::default(), rng)
    }

    /// Create a square world
    pub fn square<R: Rng + ?Sized>(size: i32, rng: &mut R) -> Result<Self> {
        Self::new(size, size, rng)
    }

    /// Create a world from configuration
    pub fn from_config<R: Rng + ?Sized>(config: &WorldConfig, rng: &mut R) -> Result<Self> {
        Self::with_rule(config.width, config.height, config.rule, rng)
    }

    pub fn with_rule<R: Rng + ?Sized>(
        width: i32,
        height: i32,
        rule: Rule,
        rng: &mut R,
    ) -> Result<Self> {
        if width < 1 || height < 1 {
            return Err(Error::InvalidDimension { width, height });
        }

        let previous = Frame::new(width, height);
        let next = Frame::new(width, height);

        // Randomised so redraws don't sweep from one corner
        let mut draw_order: Vec<Position> = previous.positions().collect();
        draw_order.shuffle(rng);

        debug!(width, height, ?rule, "Created world");

        Ok(Self {
            previous,
            next,
            draw_order,
            rule,
        })
    }

    pub fn width(&self) -> i32 {
        self.previous.width()
    }

    pub fn height(&self) -> i32 {
        self.previous.height()
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// The fixed order in which [`World::draw_changes`] visits cells
    pub fn draw_order(&self) -> &[Position] {
        &self.draw_order
    }

    /// Returns true if the coordinates are within the boundaries of the world.
    pub fn is_tile_valid(&self, x: i32, y: i32) -> bool {
        self.previous.contains(Position::new(x, y))
    }

    /// Read a cell from the last committed frame.
    pub fn get_entity(&self, x: i32, y: i32) -> Result<bool> {
        self.previous.get(Position::new(x, y))
    }

    /// Write a cell into the frame under construction.
    pub fn set_entity(&mut self, x: i32, y: i32, occupied: bool) -> Result<()> {
        self.next.set(Position::new(x, y), occupied)
    }

    /// Returns true if the tile is valid and was occupied on the committed frame.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.previous.is_occupied(Position::new(x, y))
    }

    /// Counts the occupied tiles surrounding the given coordinates.
    ///
    /// Off-grid neighbours count as dead; edges never wrap.
    pub fn count_neighbours(&self, x: i32, y: i32) -> usize {
        Position::new(x, y)
            .neighbours()
            .filter(|&pos| self.previous.is_occupied(pos))
            .count()
    }

    /// Calculates the next frame from the committed one.
    pub fn live_frame(&mut self) {
        // Reads only `previous`, so the result is independent of visit order
        for y in 0..self.height() {
            for x in 0..self.width() {
                let alive = self.is_occupied(x, y);
                let neighbours = self.count_neighbours(x, y);
                let next = self.rule.next_state(alive, neighbours);
                let written = self.next.set(Position::new(x, y), next);
                debug_assert!(written.is_ok());
            }
        }
    }

    /// Commits the frame under construction.
    pub fn save_frame(&mut self) {
        self.previous.copy_from(&self.next);
    }

    /// Reports every cell whose state differs between the two frames, in draw order.
    ///
    /// Returns the number of cells visited.
    pub fn draw_changes<V: TileVisitor + ?Sized>(&self, visitor: &mut V) -> usize {
        let mut changes = 0;
        for &pos in &self.draw_order {
            let prev = self.previous.is_occupied(pos);
            let next = self.next.is_occupied(pos);

            if prev != next {
                visitor.visit(pos, next);
                changes += 1;
            }
        }
        trace!(changes, "Drew changes");
        changes
    }

    /// Live cells in the committed frame
    pub fn population(&self) -> usize {
        self.previous.population()
    }

    /// Returns true if the committed population is too small to sustain anything.
    pub fn is_dead(&self) -> bool {
        self.previous
            .iter()
            .filter(|&(_, occupied)| occupied)
            .take(DEAD_POPULATION + 1)
            .count()
            <= DEAD_POPULATION
    }

    /// Stamps a lifeform into the next frame with its top-left cell at `(x, y)`.
    ///
    /// The whole footprint must fit; otherwise nothing is written and the
    /// first out-of-range cell is reported.
    pub fn add_lifeform(&mut self, x: i32, y: i32, lifeform: &Lifeform) -> Result<()> {
        let out_of_bounds = |x: i32, y: i32| Error::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        };

        if !self.is_tile_valid(x, y) {
            return Err(out_of_bounds(x, y));
        }

        // Anchor is in range, so the far corner can only overflow past i32::MAX
        let far = Position::new(x, y)
            .checked_add(lifeform.width() - 1, lifeform.height() - 1)
            .ok_or_else(|| {
                out_of_bounds(
                    x.saturating_add(lifeform.width() - 1),
                    y.saturating_add(lifeform.height() - 1),
                )
            })?;
        if !self.is_tile_valid(far.x, far.y) {
            return Err(out_of_bounds(far.x, far.y));
        }

        for oy in 0..lifeform.height() {
            for ox in 0..lifeform.width() {
                self.set_entity(x + ox, y + oy, lifeform.is_occupied(ox, oy))?;
            }
        }

        debug!(lifeform = lifeform.name(), x, y, "Stamped lifeform");
        Ok(())
    }
}
