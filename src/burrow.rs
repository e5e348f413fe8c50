//! The burrow: a small turn-based tile game played inside a `.sprout` file.

use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::key::Key;
use crate::screen::{Screen, TextArea};
use crate::session::Driver;
use crate::style::{style, Style};

pub type Position = (i32, i32);

pub const PLAYER_MAX_HEALTH: i32 = 10;
const PLAYER_ATTACK: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Floor,
    Wall,
    SmallBug,
    LargeBug,
    Nectar,
    Goal,
    /// Any unknown board character, drawn as itself.
    Decoration(char),
}

impl EntityKind {
    pub fn from_icon(c: char) -> EntityKind {
        match c {
            '.' => EntityKind::Floor,
            '#' => EntityKind::Wall,
            '*' => EntityKind::SmallBug,
            '@' => EntityKind::LargeBug,
            'n' => EntityKind::Nectar,
            'G' => EntityKind::Goal,
            other => EntityKind::Decoration(other),
        }
    }

    pub fn icon(self) -> String {
        match self {
            EntityKind::Floor => style(".", &[Style::Dim]),
            EntityKind::Wall => "#".to_string(),
            EntityKind::SmallBug => style("*", &[Style::Red]),
            EntityKind::LargeBug => style("@", &[Style::Red]),
            EntityKind::Nectar => style("n", &[Style::Yellow]),
            EntityKind::Goal => style("G", &[Style::Yellow]),
            EntityKind::Decoration(c) => c.to_string(),
        }
    }

    pub fn is_solid(self) -> bool {
        matches!(self, EntityKind::Wall | EntityKind::Decoration(_))
    }

    fn starting_health(self) -> i32 {
        match self {
            EntityKind::SmallBug => 1,
            EntityKind::LargeBug => 5,
            EntityKind::Wall => 5,
            _ => 0,
        }
    }

    pub fn is_hurtable(self) -> bool {
        matches!(self, EntityKind::SmallBug | EntityKind::LargeBug)
    }

    pub fn damage(self) -> i32 {
        match self {
            EntityKind::SmallBug => 1,
            EntityKind::LargeBug => 3,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: usize,
    pub kind: EntityKind,
    pub health: i32,
}

/// Entities stacked per tile; the last one is drawn. Positions are 1-based.
#[derive(Debug, Clone, Default)]
pub struct Board {
    tiles: BTreeMap<Position, Vec<Entity>>,
    next_id: usize,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a text tilemap. Whitespace at either end of a line
    /// is empty space.
    pub fn load(text: &str) -> Board {
        let mut board = Board::new();
        for (row, line) in text.lines().enumerate() {
            let start = line.len() - line.trim_start().len();
            let trimmed = line.trim();
            let start_col = line[..start].chars().count();
            for (i, c) in trimmed.chars().enumerate() {
                let position = ((start_col + i + 1) as i32, (row + 1) as i32);
                board.spawn(position, EntityKind::from_icon(c));
            }
        }
        board
    }

    pub fn spawn(&mut self, position: Position, kind: EntityKind) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.tiles.entry(position).or_default().push(Entity {
            id,
            kind,
            health: kind.starting_health(),
        });
        id
    }

    /// Entities on a tile. Nothing here means void.
    pub fn at(&self, position: Position) -> &[Entity] {
        self.tiles.get(&position).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn is_solid(&self, position: Position) -> bool {
        let entities = self.at(position);
        entities.is_empty() || entities.iter().any(|e| e.kind.is_solid())
    }

    pub fn remove(&mut self, position: Position, id: usize) {
        if let Some(entities) = self.tiles.get_mut(&position) {
            entities.retain(|e| e.id != id);
        }
    }

    /// Hit one random hurtable entity on the tile. Returns whether anything was hit.
    pub fn hurt_random(&mut self, position: Position, amount: i32, rng: &mut SmallRng) -> bool {
        let ids: Vec<usize> = self
            .at(position)
            .iter()
            .filter(|e| e.kind.is_hurtable())
            .map(|e| e.id)
            .collect();
        let Some(&id) = ids.choose(rng) else {
            return false;
        };
        let mut dead = false;
        if let Some(target) = self
            .tiles
            .get_mut(&position)
            .and_then(|entities| entities.iter_mut().find(|e| e.id == id))
        {
            target.health -= amount;
            dead = target.health <= 0;
        }
        if dead {
            self.remove(position, id);
        }
        true
    }

    pub fn draw(&self, screen: &mut Screen, offset: Position) {
        for (position, entities) in &self.tiles {
            if let Some(top) = entities.last() {
                let (column, row) = (position.0 + offset.0, position.1 + offset.1);
                if column >= 1 && row >= 1 {
                    screen.cursor_set(column as u16, row as u16);
                    screen.print(&top.kind.icon());
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurrowState {
    Alive,
    Dead,
    Won,
    Exited,
}

pub const BOARD_OFFSET: Position = (3, 1);

/// One burrow run: the board plus the aphid's in-burrow body.
#[derive(Debug, Clone)]
pub struct Burrow {
    pub board: Board,
    pub position: Position,
    pub health: i32,
    pub drivers: Vec<Driver>,
    next_driver: usize,
    moves_left: usize,
    pub state: BurrowState,
}

impl Burrow {
    /// The aphid's drivers are shuffled for every run.
    pub fn new(board: Board, spawn: Position, drivers: &[Driver], rng: &mut SmallRng) -> Self {
        let mut drivers = drivers.to_vec();
        if drivers.is_empty() {
            drivers.push(Driver::Move);
        }
        drivers.shuffle(rng);
        let moves_left = drivers.len();
        Burrow {
            board,
            position: spawn,
            health: PLAYER_MAX_HEALTH,
            drivers,
            next_driver: 0,
            moves_left,
            state: BurrowState::Alive,
        }
    }

    pub fn current_driver(&self) -> Driver {
        self.drivers[self.next_driver % self.drivers.len()]
    }

    pub fn moves_left(&self) -> usize {
        self.moves_left
    }

    pub fn is_over(&self) -> bool {
        self.state != BurrowState::Alive
    }

    /// Apply one key. Arrow keys aim the current driver; `q` or Escape leave.
    pub fn press(&mut self, key: Key, rng: &mut SmallRng) {
        if self.is_over() {
            return;
        }
        if key == Key::Escape || key.is_char('q') {
            self.state = BurrowState::Exited;
            return;
        }
        let Some((dx, dy)) = key.direction() else {
            return;
        };
        let target = (self.position.0 + dx, self.position.1 + dy);
        match self.current_driver() {
            Driver::Move => {
                if !self.board.is_solid(target) {
                    self.position = target;
                }
            }
            Driver::Attack => {
                self.board.hurt_random(target, PLAYER_ATTACK, rng);
            }
        }
        self.next_driver = (self.next_driver + 1) % self.drivers.len();
        self.moves_left -= 1;
        if self.moves_left == 0 {
            self.environment_turn();
            self.moves_left = self.drivers.len();
        }
    }

    /// Resolve whatever shares the aphid's tile.
    pub fn environment_turn(&mut self) {
        let here: Vec<Entity> = self.board.at(self.position).to_vec();
        for entity in here {
            match entity.kind {
                EntityKind::Nectar => {
                    self.health = (self.health + 2).min(PLAYER_MAX_HEALTH);
                    self.board.remove(self.position, entity.id);
                }
                EntityKind::SmallBug | EntityKind::LargeBug => {
                    self.health -= entity.kind.damage();
                    if self.health <= 0 {
                        self.state = BurrowState::Dead;
                        return;
                    }
                }
                EntityKind::Goal => self.state = BurrowState::Won,
                _ => {}
            }
        }
    }

    pub fn draw(&self, screen: &mut Screen) {
        self.board.draw(screen, BOARD_OFFSET);
        let (column, row) = (
            self.position.0 + BOARD_OFFSET.0,
            self.position.1 + BOARD_OFFSET.1,
        );
        if column >= 1 && row >= 1 {
            screen.cursor_set(column as u16, row as u16);
            screen.print(&style("n", &[Style::Green]));
        }
        let (columns, rows) = screen.size();
        let hp_style = if self.health > PLAYER_MAX_HEALTH / 2 {
            Style::Green
        } else {
            Style::Red
        };
        let order: Vec<String> = self.drivers.iter().map(|d| d.to_string()).collect();
        let text = format!(
            "Goal: End your turn on the {}\nCurrent Action: {}\nAll Actions: {}\nActions Left: {}\nAPHID HP: {}/{}",
            style("G", &[Style::Yellow]),
            style(&self.current_driver().to_string(), &[Style::Blue]),
            order.join(" -> "),
            self.moves_left,
            style(&self.health.to_string(), &[hp_style]),
            PLAYER_MAX_HEALTH,
        );
        screen.draw_text_box(
            &TextArea::new(4, rows.saturating_sub(6).max(1), columns.saturating_sub(4), 6, &text),
            true,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn test_load_positions() {
        let board = Board::load(" * \n   #");
        assert_eq!(board.at((2, 1))[0].kind, EntityKind::SmallBug);
        assert_eq!(board.at((4, 2))[0].kind, EntityKind::Wall);
        assert!(board.at((1, 1)).is_empty());
        assert!(board.at((3, 1)).is_empty());
    }

    #[test]
    fn test_load_blank_board() {
        let board = Board::load("    ");
        assert!(board.at((1, 1)).is_empty());
    }

    #[test]
    fn test_unknown_icon_is_decoration() {
        let board = Board::load("x");
        assert_eq!(board.at((1, 1))[0].kind, EntityKind::Decoration('x'));
        assert!(board.is_solid((1, 1)));
    }

    #[test]
    fn test_move_blocked_by_walls_and_void() {
        let board = Board::load("#..");
        let mut burrow = Burrow::new(board, (2, 1), &[Driver::Move], &mut rng());
        burrow.press(Key::Left, &mut rng());
        assert_eq!(burrow.position, (2, 1));
        burrow.press(Key::Up, &mut rng());
        assert_eq!(burrow.position, (2, 1));
        burrow.press(Key::Right, &mut rng());
        assert_eq!(burrow.position, (3, 1));
    }

    #[test]
    fn test_moves_per_turn_match_drivers() {
        let board = Board::load(".....");
        let mut burrow = Burrow::new(board, (1, 1), &[Driver::Move, Driver::Move], &mut rng());
        assert_eq!(burrow.moves_left(), 2);
        burrow.press(Key::Char('x'), &mut rng());
        assert_eq!(burrow.moves_left(), 2);
        burrow.press(Key::Right, &mut rng());
        assert_eq!(burrow.moves_left(), 1);
        burrow.press(Key::Right, &mut rng());
        assert_eq!(burrow.moves_left(), 2);
    }

    #[test]
    fn test_goal_wins() {
        let board = Board::load(".G");
        let mut burrow = Burrow::new(board, (1, 1), &[Driver::Move], &mut rng());
        burrow.press(Key::Right, &mut rng());
        assert_eq!(burrow.state, BurrowState::Won);
    }

    #[test]
    fn test_bugs_bite_until_dead() {
        let mut board = Board::load("..");
        board.spawn((2, 1), EntityKind::LargeBug);
        let mut burrow = Burrow::new(board, (1, 1), &[Driver::Move], &mut rng());
        burrow.press(Key::Right, &mut rng());
        assert_eq!(burrow.health, PLAYER_MAX_HEALTH - 3);
        for _ in 0..3 {
            burrow.press(Key::Up, &mut rng());
        }
        assert_eq!(burrow.state, BurrowState::Dead);
    }

    #[test]
    fn test_nectar_heals_and_is_consumed() {
        let board = Board::load(".n");
        let mut burrow = Burrow::new(board, (1, 1), &[Driver::Move], &mut rng());
        burrow.health = 5;
        burrow.press(Key::Right, &mut rng());
        assert_eq!(burrow.health, 7);
        assert!(burrow
            .board
            .at((2, 1))
            .iter()
            .all(|e| e.kind != EntityKind::Nectar));
    }

    #[test]
    fn test_attack_removes_bug() {
        let board = Board::load("..*");
        let mut burrow = Burrow::new(board, (2, 1), &[Driver::Attack], &mut rng());
        burrow.press(Key::Right, &mut rng());
        assert!(burrow.board.at((3, 1)).iter().all(|e| !e.kind.is_hurtable()));
    }

    #[test]
    fn test_quit_exits() {
        let board = Board::load("..");
        let mut burrow = Burrow::new(board, (1, 1), &[Driver::Move], &mut rng());
        burrow.press(Key::Char('q'), &mut rng());
        assert_eq!(burrow.state, BurrowState::Exited);
    }

    #[test]
    fn test_tutorial_board_loads() {
        let board = Board::load(crate::assets::board("tutorial_board.txt").unwrap());
        assert_eq!(board.at((4, 2))[0].kind, EntityKind::Floor);
        assert_eq!(board.at((11, 6))[0].kind, EntityKind::Goal);
    }
}
