use crate::interval::Interval;
use crate::symbol::Symbol;

/// Endpoint event for the sweep: `Open` sorts before `Close` at equal
/// positions so that touching intervals produce a shared cover piece.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Event {
    Open,
    Close,
}

/// Split a collection of (possibly overlapping) closed intervals into the
/// coarsest set of pairwise-disjoint closed intervals such that every input
/// interval is exactly a union of output intervals.
///
/// This is the routine subset construction and the minimizer lean on: for any
/// output interval `I`, every input interval either contains `I` entirely or
/// is disjoint from it, so "move over `I`" is well defined.
///
/// The sweep walks the sorted endpoint events keeping a depth counter. While
/// at least one interval is open, the span between two consecutive events is
/// emitted, shrunk by one on the side of an endpoint that does not belong to
/// it: after a `Close` the next span starts one past it, and before an `Open`
/// the previous span stops one short of it.
///
/// Output intervals come out in ascending order.
pub fn disjoint_cover<S, I>(labels: I) -> Vec<Interval<S>>
where
    S: Symbol,
    I: IntoIterator<Item = Interval<S>>,
{
    let mut events: Vec<(S, Event)> = Vec::new();
    for iv in labels {
        events.push((iv.lo, Event::Open));
        events.push((iv.hi, Event::Close));
    }
    events.sort_unstable();

    let mut out = Vec::new();
    let mut depth: usize = 0;
    let mut last: Option<(S, Event)> = None;
    for (pos, event) in events {
        if depth > 0 {
            if let Some((last_pos, last_event)) = last {
                let lo = match last_event {
                    Event::Open => Some(last_pos),
                    Event::Close => last_pos.next(),
                };
                let hi = match event {
                    Event::Open => pos.prev(),
                    Event::Close => Some(pos),
                };
                if let (Some(lo), Some(hi)) = (lo, hi) {
                    if lo <= hi {
                        out.push(Interval::new(lo, hi));
                    }
                }
            }
        }
        last = Some((pos, event));
        match event {
            Event::Open => depth += 1,
            Event::Close => depth -= 1,
        }
    }
    out
}
