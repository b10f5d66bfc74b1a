/// One grid cell occupied by the snake or the fruit, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Segment {
    pub x: i32,
    pub y: i32,
}

impl Segment {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Snake body (head first) plus the score it has collected.
#[derive(Clone, Debug, PartialEq)]
pub struct Snake {
    body: Vec<Segment>,
    score: u32,
}

impl Snake {
    pub fn new(body: Vec<Segment>, score: u32) -> Self {
        Self { body, score }
    }

    /// Head at the origin with the rest of the body trailing off-board to the left.
    pub fn initial(cell: i32, length: usize) -> Self {
        let body = (0..length as i32).map(|i| Segment::new(-i * cell, 0)).collect();
        Self::new(body, 0)
    }

    pub fn head(&self) -> Segment {
        self.body[0]
    }

    pub fn body(&self) -> &[Segment] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn occupies(&self, cell: Segment) -> bool {
        self.body.contains(&cell)
    }

    /// True when the head shares a cell with any other segment.
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body[1..].contains(&head)
    }

    /// Each segment takes its predecessor's cell, then the head moves to `to`.
    /// The old tail cell is simply overwritten.
    pub fn advance(&mut self, to: Segment) {
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }
        self.body[0] = to;
    }

    /// Duplicate the tail cell; the copy unfolds on the next `advance`.
    pub fn grow(&mut self, reward: u32) {
        if let Some(&tail) = self.body.last() {
            self.body.push(tail);
        }
        self.score += reward;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_body_trails_left_of_origin() {
        let s = Snake::initial(25, 3);
        assert_eq!(
            s.body(),
            &[Segment::new(0, 0), Segment::new(-25, 0), Segment::new(-50, 0)]
        );
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn advance_shifts_segments_toward_head() {
        let mut s = Snake::initial(25, 3);
        s.advance(Segment::new(25, 0));
        assert_eq!(
            s.body(),
            &[Segment::new(25, 0), Segment::new(0, 0), Segment::new(-25, 0)]
        );
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn grow_stacks_on_tail_then_unfolds() {
        let mut s = Snake::initial(25, 3);
        s.grow(100);
        assert_eq!(s.len(), 4);
        assert_eq!(s.score(), 100);
        assert_eq!(s.body()[2], s.body()[3]);
        s.advance(Segment::new(25, 0));
        assert_eq!(s.body()[3], Segment::new(-50, 0));
        assert_eq!(s.body()[2], Segment::new(-25, 0));
        assert!(!s.head_overlaps_body());
    }

    #[test]
    fn detects_head_on_body() {
        let s = Snake::new(
            vec![
                Segment::new(25, 25),
                Segment::new(50, 25),
                Segment::new(25, 25),
            ],
            0,
        );
        assert!(s.head_overlaps_body());
    }
}
