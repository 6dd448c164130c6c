/// Mask penalty scoring (the four rules of ISO/IEC 18004 section 7.8.3)
use crate::models::BitMatrix;

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// Total penalty of a square module grid; lower is better.
pub fn score(modules: &BitMatrix) -> u32 {
    let size = modules.width();
    let mut result = 0;

    // Runs and finder-like patterns, along rows then columns
    for y in 0..size {
        result += score_line(size, |x| modules.get(x, y));
    }
    for x in 0..size {
        result += score_line(size, |y| modules.get(x, y));
    }

    // 2x2 blocks of one colour
    for y in 0..size.saturating_sub(1) {
        for x in 0..size - 1 {
            let color = modules.get(x, y);
            if color == modules.get(x + 1, y)
                && color == modules.get(x, y + 1)
                && color == modules.get(x + 1, y + 1)
            {
                result += PENALTY_N2;
            }
        }
    }

    result + balance_penalty(modules.count_ones(), size * size)
}

fn score_line(size: usize, module: impl Fn(usize) -> bool) -> u32 {
    let mut result = 0;
    let mut run_color = false;
    let mut run_len = 0usize;
    let mut history = RunHistory::new(size);
    for i in 0..size {
        if module(i) == run_color {
            run_len += 1;
            if run_len == 5 {
                result += PENALTY_N1;
            } else if run_len > 5 {
                result += 1;
            }
        } else {
            history.push(run_len);
            if !run_color {
                result += history.count_finder_like() * PENALTY_N3;
            }
            run_color = module(i);
            run_len = 1;
        }
    }
    result + history.terminate(run_color, run_len) * PENALTY_N3
}

/// Smallest k such that the dark ratio lies within (45 - 5k)%..=(55 + 5k)%
fn balance_penalty(dark: usize, total: usize) -> u32 {
    let deviation = (dark as i64 * 20 - total as i64 * 10).unsigned_abs();
    let total = total as u64;
    let k = ((deviation + total - 1) / total).saturating_sub(1);
    k as u32 * PENALTY_N4
}

/// Lengths of the last seven runs on a line, newest first.
///
/// The light border around the symbol counts towards the first and last
/// light runs, so a finder-like pattern touching the edge still scores.
struct RunHistory {
    size: usize,
    runs: [usize; 7],
}

impl RunHistory {
    fn new(size: usize) -> Self {
        Self { size, runs: [0; 7] }
    }

    fn push(&mut self, mut run_len: usize) {
        if self.runs[0] == 0 {
            run_len += self.size;
        }
        self.runs.copy_within(0..6, 1);
        self.runs[0] = run_len;
    }

    /// Dark-light-dark(3)-light-dark runs framed by 4 light modules on either side
    fn count_finder_like(&self) -> u32 {
        let r = &self.runs;
        let n = r[1];
        let core = n > 0 && r[2] == n && r[3] == n * 3 && r[4] == n && r[5] == n;
        u32::from(core && r[0] >= n * 4 && r[6] >= n) + u32::from(core && r[6] >= n * 4 && r[0] >= n)
    }

    fn terminate(mut self, run_color: bool, mut run_len: usize) -> u32 {
        if run_color {
            self.push(run_len);
            run_len = 0;
        }
        self.push(run_len + self.size);
        self.count_finder_like()
    }
}
