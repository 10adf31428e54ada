//! The [`Stage`] trait and the stages built on top of it.
//!
//! A stage is one step of a pipeline: something that consumes an input
//! (usually a sequence) and produces an output (a sequence, a scalar, or a
//! future of a scalar). Every `FnOnce(Input) -> Output` is a stage, and so
//! is every deferred operator from [`stage`](super::stage).
//!
//! # Laws
//!
//! For any stages `f`, `g` and `h` and any input `x`:
//!
//! - **Identity**: `Identity.apply(x) == x`
//! - **Sequencing**: `Composed::new(f, g).apply(x) == g.apply(f.apply(x))`
//! - **Associativity**: `Composed::new(Composed::new(f, g), h)` and
//!   `Composed::new(f, Composed::new(g, h))` produce the same output

#[cfg(feature = "async")]
use std::future::Future;
#[cfg(feature = "async")]
use std::marker::PhantomData;
#[cfg(feature = "async")]
use std::pin::Pin;
#[cfg(feature = "async")]
use std::task::{Context, Poll, ready};

#[cfg(feature = "async")]
use pin_project_lite::pin_project;

/// One step of a pipeline.
///
/// The `Marker` parameter only exists to keep implementations apart; it is
/// always inferred. Closures and functions use the default marker `()`,
/// asynchronous operator stages use the marker of the
/// [`IntoAsyncSequence`](crate::sequence::IntoAsyncSequence) conversion they
/// perform.
///
/// # Examples
///
/// ```rust
/// use seqflow::compose::Stage;
/// use seqflow::compose::stage;
///
/// let doubled: Vec<i32> = stage::map(|value: i32| value * 2).apply(vec![1, 2]).collect();
/// assert_eq!(doubled, vec![2, 4]);
///
/// let length = (|text: &str| text.len()).apply("four");
/// assert_eq!(length, 4);
/// ```
pub trait Stage<Input, Marker = ()> {
    /// What the stage produces.
    type Output;

    /// Runs the stage on `input`.
    fn apply(self, input: Input) -> Self::Output;
}

impl<Input, Output, F> Stage<Input> for F
where
    F: FnOnce(Input) -> Output,
{
    type Output = Output;

    #[inline]
    fn apply(self, input: Input) -> Output {
        self(input)
    }
}

/// Applies `stage` to `input`.
///
/// The function form of [`pipe!`](crate::pipe) with a single stage; combine
/// it with [`compose!`](crate::compose) for longer chains.
///
/// # Examples
///
/// ```rust
/// use seqflow::compose;
/// use seqflow::compose::{pipeline, stage};
///
/// let total = pipeline(
///     vec![1, 2, 3, 4],
///     compose!(stage::filter(|value: &i32| value % 2 == 0), stage::count()),
/// );
/// assert_eq!(total, 2);
/// ```
#[inline]
pub fn pipeline<Input, Marker, S>(input: Input, stage: S) -> S::Output
where
    S: Stage<Input, Marker>,
{
    stage.apply(input)
}

/// The stage that returns its input unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Identity;

impl<Input> Stage<Input> for Identity {
    type Output = Input;

    #[inline]
    fn apply(self, input: Input) -> Input {
        input
    }
}

/// Two stages applied one after the other, `first` then `second`.
///
/// Usually built with [`compose!`](crate::compose). A `Composed` value is a
/// reusable pipeline: when its parts are [`Clone`] it can be run on many
/// inputs with [`Composed::call`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[must_use = "stages do nothing unless applied"]
pub struct Composed<A, B> {
    first: A,
    second: B,
}

impl<A, B> Composed<A, B> {
    /// Chains `first` and `second`.
    pub const fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Runs a copy of the pipeline on `input`, keeping the pipeline usable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqflow::compose;
    /// use seqflow::compose::stage;
    ///
    /// let evens = compose!(stage::filter(|value: &i32| value % 2 == 0), stage::collect_array());
    /// assert_eq!(evens.call(vec![1, 2, 3, 4]), vec![2, 4]);
    /// assert_eq!(evens.call(vec![6, 7]), vec![6]);
    /// ```
    pub fn call<Input, Marker>(&self, input: Input) -> <Self as Stage<Input, Marker>>::Output
    where
        Self: Stage<Input, Marker> + Clone,
    {
        self.clone().apply(input)
    }
}

impl<Input, MarkerA, MarkerB, A, B> Stage<Input, (MarkerA, MarkerB)> for Composed<A, B>
where
    A: Stage<Input, MarkerA>,
    B: Stage<A::Output, MarkerB>,
{
    type Output = B::Output;

    #[inline]
    fn apply(self, input: Input) -> B::Output {
        self.second.apply(self.first.apply(input))
    }
}

/// A stage that consumes the awaited output of a future.
///
/// Returned by [`stage::awaited`](super::stage::awaited).
#[cfg(feature = "async")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[must_use = "stages do nothing unless applied"]
pub struct Awaited<S> {
    stage: S,
}

#[cfg(feature = "async")]
impl<S> Awaited<S> {
    pub(crate) const fn new(stage: S) -> Self {
        Self { stage }
    }
}

#[cfg(feature = "async")]
impl<Fut, Marker, S> Stage<Fut, Marker> for Awaited<S>
where
    Fut: Future,
    S: Stage<Fut::Output, Marker>,
{
    type Output = AwaitedApply<Fut, S, Marker>;

    fn apply(self, input: Fut) -> Self::Output {
        AwaitedApply {
            future: input,
            stage: Some(self.stage),
            marker: PhantomData,
        }
    }
}

#[cfg(feature = "async")]
pin_project! {
    /// Future returned by applying an [`Awaited`] stage.
    ///
    /// # Panics
    ///
    /// Polling again after the future has completed panics.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct AwaitedApply<Fut, S, Marker> {
        #[pin]
        future: Fut,
        stage: Option<S>,
        marker: PhantomData<fn() -> Marker>,
    }
}

#[cfg(feature = "async")]
impl<Fut, S, Marker> Future for AwaitedApply<Fut, S, Marker>
where
    Fut: Future,
    S: Stage<Fut::Output, Marker>,
{
    type Output = S::Output;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<S::Output> {
        let this = self.project();
        let output = ready!(this.future.poll(context));
        let Some(stage) = this.stage.take() else {
            panic!("`AwaitedApply` polled after completion");
        };
        Poll::Ready(stage.apply(output))
    }
}
