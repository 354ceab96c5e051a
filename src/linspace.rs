/// produces: [ linear_interpol(start, end, i/(num-1)) | i <- 0..num ]
/// (DOES include "end", as the histogram edges need both bounds)
///
/// linear_interpol(a, b, p) = (1 - p) * a + p * b
#[derive(Clone, Debug)]
pub struct Linspace {
    current: u64,
    num: u64,
    start: f64,
    end: f64,
}

impl Linspace {
    pub fn new(start: f64, end: f64, num: u64) -> Self {
        Linspace {
            current: 0,
            num,
            start,
            end,
        }
    }

    /// edges for `bins` equal-width bins between start and end
    pub fn edges(start: f64, end: f64, bins: usize) -> Self {
        Self::new(start, end, bins as u64 + 1)
    }

    fn at(&self, pos: u64) -> f64 {
        if self.num < 2 {
            return self.start;
        }
        if pos == self.num - 1 {
            return self.end;
        }
        let f_pos = pos as f64 / (self.num - 1) as f64;
        (1. - f_pos) * self.start + f_pos * self.end
    }
}

impl Iterator for Linspace {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.num {
            return None;
        }
        let result = self.at(self.current);
        self.current += 1;
        Some(result)
    }

    /// exact, so collecting the edges allocates once
    fn size_hint(&self) -> (usize, Option<usize>) {
        let l = (self.num - self.current) as usize;
        (l, Some(l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_both_bounds() {
        let v: Vec<f64> = Linspace::new(0., 1., 5).collect();
        assert_eq!(v, vec![0., 0.25, 0.5, 0.75, 1.]);
    }

    #[test]
    fn edges_are_one_more_than_bins() {
        let edges: Vec<f64> = Linspace::edges(10., 20., 100).collect();
        assert_eq!(edges.len(), 101);
        assert_eq!(edges.first(), Some(&10.));
        assert_eq!(edges.last(), Some(&20.));
    }
}
