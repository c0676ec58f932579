//! Parametrization combinators
//!
//! Each combinator takes a descriptor and returns a new one; inputs are
//! never modified. Values come in as a [`Param`] (one value broadcast to
//! every child, or a sequence zipped against them) or, where a generator is
//! accepted, as a [`Sampler`].

use mandala_paint::{ring_points, Vec2};

use crate::builders::group;
use crate::sequence::{random, RandomOptions};
use crate::shape::{Attributes, Shape, ShapeKind};
use crate::value::{Param, Sampler, Value};

/// Replace each child of `group` with `f(child, value)`.
///
/// A sequence is zipped by index and the result is truncated to the shorter
/// of the two; a single value is passed to every child. Leaves are returned
/// unchanged.
pub fn gmap<F>(f: F, group: &Shape, values: impl Into<Param>) -> Shape
where
    F: Fn(&Shape, &Value) -> Shape,
{
    if !group.is_composite() {
        return group.clone();
    }

    let children = match values.into() {
        Param::One(value) => group.children().iter().map(|c| f(c, &value)).collect(),
        Param::Many(values) => group
            .children()
            .iter()
            .zip(&values)
            .map(|(c, v)| f(c, v))
            .collect(),
    };
    group.with_children(children)
}

/// Group of `count` copies of `shape`
pub fn replicate(shape: &Shape, count: usize) -> Shape {
    group(vec![shape.clone(); count], Attributes::new())
}

/// Group of `count` shapes, each produced by a fresh call to `f`
pub fn repeatedly<F>(mut f: F, count: usize) -> Shape
where
    F: FnMut() -> Shape,
{
    group((0..count).map(|_| f()).collect::<Vec<_>>(), Attributes::new())
}

fn assign(key: &str) -> impl Fn(&Shape, &Value) -> Shape + '_ {
    move |shape, value| shape.with(key, value.clone())
}

/// Set `key` from `values`, replicating the descriptor when needed.
///
/// A sequence of n values yields a group of n copies of `shape`, copy i
/// carrying value i. A single value is broadcast across an existing group's
/// children, or set directly on anything else.
pub fn parametrize_on(shape: &Shape, key: &str, values: impl Into<Param>) -> Shape {
    match values.into() {
        Param::Many(values) => gmap(
            assign(key),
            &replicate(shape, values.len()),
            Param::Many(values),
        ),
        Param::One(value) if shape.kind() == ShapeKind::Group => {
            gmap(assign(key), shape, Param::One(value))
        }
        Param::One(value) => shape.with(key, value),
    }
}

/// Set `key` across the existing children of `shape` without replicating.
///
/// A generator is called with the child count and its values are handed to
/// [`parametrize_on`].
pub fn parametrize_in(shape: &Shape, key: &str, values: impl Into<Sampler>) -> Shape {
    match values.into() {
        Sampler::Generator(generate) => {
            let values = generate(shape.children().len());
            parametrize_on(shape, key, Param::Many(values))
        }
        Sampler::Values(param) => gmap(assign(key), shape, param),
    }
}

/// Like [`parametrize_in`], but generated values are zipped against the
/// existing children as well
pub fn sample(shape: &Shape, key: &str, values: impl Into<Sampler>) -> Shape {
    let param = match values.into() {
        Sampler::Generator(generate) => Param::Many(generate(shape.children().len())),
        Sampler::Values(param) => param,
    };
    gmap(assign(key), shape, param)
}

/// Random values in `[min, max)`; a single value is a scalar
fn random_param(bounds: (f64, f64), options: &RandomOptions) -> Param {
    let values = random(bounds.0, bounds.1, options);
    if let [one] = values[..] {
        return Param::One(Value::Number(one));
    }
    Param::from(values)
}

pub fn randomize_on(shape: &Shape, key: &str, bounds: (f64, f64), options: &RandomOptions) -> Shape {
    parametrize_on(shape, key, random_param(bounds, options))
}

pub fn randomize_in(shape: &Shape, key: &str, bounds: (f64, f64), options: &RandomOptions) -> Shape {
    parametrize_in(shape, key, random_param(bounds, options))
}

/// Spread along x
pub fn row(shape: &Shape, distances: impl Into<Param>) -> Shape {
    parametrize_on(shape, "translateX", distances)
}

/// Spread along y
pub fn col(shape: &Shape, distances: impl Into<Param>) -> Shape {
    parametrize_on(shape, "translateY", distances)
}

/// Columns nested inside rows; the column distances default to the row ones
pub fn grid(shape: &Shape, row_distances: impl Into<Param>, col_distances: Option<Param>) -> Shape {
    let row_distances = row_distances.into();
    let col_distances = col_distances.unwrap_or_else(|| row_distances.clone());
    row(&col(shape, col_distances), row_distances)
}

/// `count` copies translated to evenly spaced points on a circle
pub fn ring(shape: &Shape, radius: f64, count: usize, center: Vec2) -> Shape {
    parametrize_on(shape, "translate", ring_points(radius, count, center, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use crate::builders::{circle, rect};
    use crate::sequence::steps_fn;

    fn dots(count: usize) -> Shape {
        group(
            (0..count).map(|i| circle(attrs! { r: i })).collect::<Vec<_>>(),
            attrs! {},
        )
    }

    fn values_of<'a>(shape: &'a Shape, key: &str) -> Vec<Option<&'a Value>> {
        shape.children().iter().map(|c| c.attr(key)).collect()
    }

    #[test]
    fn gmap_broadcasts_a_scalar() {
        let mapped = gmap(|c, v| c.with("fill", v.clone()), &dots(4), "red");
        assert_eq!(mapped.children().len(), 4);
        assert!(values_of(&mapped, "fill")
            .iter()
            .all(|v| *v == Some(&Value::from("red"))));
        for (i, child) in mapped.children().iter().enumerate() {
            assert_eq!(child.number("r"), Some(i as f64));
        }
    }

    #[test]
    fn gmap_truncates_to_the_shorter_side() {
        let mapped = gmap(|c, v| c.with("cx", v.clone()), &dots(4), vec![1.0, 2.0]);
        assert_eq!(mapped.children().len(), 2);
        let longer = gmap(|c, v| c.with("cx", v.clone()), &dots(2), vec![1.0, 2.0, 3.0]);
        assert_eq!(longer.children().len(), 2);
    }

    #[test]
    fn gmap_leaves_leaves_alone() {
        let leaf = circle(attrs! { r: 1 });
        assert_eq!(gmap(|c, _| c.with("r", 9), &leaf, 0), leaf);
    }

    #[test]
    fn replicate_and_repeatedly() {
        let dot = circle(attrs! { r: 1 });
        assert_eq!(replicate(&dot, 3).children(), [dot.clone(), dot.clone(), dot.clone()]);
        assert!(replicate(&dot, 0).children().is_empty());

        let mut n = 0;
        let made = repeatedly(
            || {
                n += 1;
                circle(attrs! { r: n })
            },
            3,
        );
        assert_eq!(values_of(&made, "r")[2], Some(&Value::Number(3.0)));
    }

    #[test]
    fn parametrize_on_replicates_for_sequences() {
        let dot = circle(attrs! { r: 2 });
        let points = vec![[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]];
        let spread = parametrize_on(&dot, "translate", points.clone());

        assert_eq!(spread.kind(), ShapeKind::Group);
        assert_eq!(spread.children().len(), 3);
        for (child, point) in spread.children().iter().zip(points) {
            assert_eq!(child.attr("translate"), Some(&Value::from(point)));
            assert_eq!(child.number("r"), Some(2.0));
        }
        assert_eq!(dot.attr("translate"), None);
    }

    #[test]
    fn parametrize_on_scalars() {
        let spread = parametrize_on(&dots(3), "opacity", 0.5);
        assert_eq!(spread.children().len(), 3);
        assert!(spread.attr("opacity").is_none());
        assert!(values_of(&spread, "opacity")
            .iter()
            .all(|v| *v == Some(&Value::Number(0.5))));

        let leaf = parametrize_on(&circle(attrs! { r: 1 }), "opacity", 0.5);
        assert_eq!(leaf.kind(), ShapeKind::Circle);
        assert_eq!(leaf.number("opacity"), Some(0.5));
    }

    #[test]
    fn parametrize_in_zips_existing_children() {
        let varied = parametrize_in(&dots(3), "cx", vec![10.0, 20.0, 30.0]);
        assert_eq!(varied.children().len(), 3);
        assert_eq!(varied.children()[1].number("cx"), Some(20.0));
        assert_eq!(varied.children()[1].number("r"), Some(1.0));
    }

    #[test]
    fn parametrize_in_generators_replicate() {
        let varied = parametrize_in(&dots(3), "opacity", Sampler::generator(steps_fn(0.0, 1.0)));
        assert_eq!(varied.children().len(), 3);
        assert_eq!(varied.children()[2].number("opacity"), Some(1.0));
        assert_eq!(varied.children()[2].children().len(), 3);
    }

    #[test]
    fn sample_zips_generated_values() {
        let sampled = sample(&dots(4), "opacity", Sampler::generator(steps_fn(0.0, 1.0)));
        assert_eq!(sampled.children().len(), 4);
        assert_eq!(sampled.children()[0].kind(), ShapeKind::Circle);
        assert_eq!(sampled.children()[3].number("opacity"), Some(1.0));
    }

    #[test]
    fn randomize_is_seed_stable() {
        let options = RandomOptions::seeded(42, 5);
        let a = randomize_on(&circle(attrs! { r: 1 }), "cx", (0.0, 100.0), &options);
        let b = randomize_on(&circle(attrs! { r: 1 }), "cx", (0.0, 100.0), &options);
        assert_eq!(a, b);
        assert_eq!(a.children().len(), 5);
    }

    #[test]
    fn single_random_value_is_a_scalar() {
        let options = RandomOptions::seeded(1, 1);
        let leaf = randomize_on(&circle(attrs! { r: 1 }), "cx", (0.0, 10.0), &options);
        assert_eq!(leaf.kind(), ShapeKind::Circle);

        let varied = randomize_in(&dots(3), "cx", (0.0, 10.0), &options);
        let first = varied.children()[0].attr("cx");
        assert!(values_of(&varied, "cx").iter().all(|v| *v == first));
    }

    #[test]
    fn grid_nests_columns_inside_rows() {
        let cell = rect(attrs! { width: 1, height: 1 });
        let lattice = grid(&cell, vec![0.0, 10.0], Some(Param::from(vec![0.0, 5.0, 10.0])));

        assert_eq!(lattice.children().len(), 2);
        for (column, x) in lattice.children().iter().zip([0.0, 10.0]) {
            assert_eq!(column.number("translateX"), Some(x));
            assert_eq!(column.children().len(), 3);
            assert_eq!(column.children()[2].number("translateY"), Some(10.0));
        }

        let square = grid(&cell, vec![0.0, 1.0], None);
        assert_eq!(square.children()[1].children().len(), 2);
    }

    #[test]
    fn ring_translates_copies_onto_a_circle() {
        let spread = ring(&circle(attrs! { r: 2 }), 50.0, 6, Vec2::ZERO);
        let expected = ring_points(50.0, 6, Vec2::ZERO, 0.0);
        assert_eq!(spread.children().len(), 6);
        for (child, point) in spread.children().iter().zip(expected) {
            assert_eq!(child.attr("translate"), Some(&Value::Vector(point)));
        }
    }
}
