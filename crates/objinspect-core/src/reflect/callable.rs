//! Callable reflection objects: functions, methods, and constructors.

use std::fmt;
use std::sync::Arc;

use crate::model::{BoundArguments, ParameterKind};
use crate::typing::TypeExpr;
use crate::value::Value;

/// Native body of a callable. Receives fully bound arguments.
pub type NativeFn = Arc<dyn Fn(&BoundArguments) -> Result<Value, String> + Send + Sync>;

/// A declared annotation as the runtime stores it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawAnnotation {
    Type(TypeExpr),
    /// A string annotation naming a type that is not evaluated.
    ForwardRef(String),
}

/// One declared parameter as the runtime reports it.
///
/// `kind` is `None` when the runtime could not classify the parameter; the
/// signature extractor rejects such callables.
#[derive(Debug, Clone, PartialEq)]
pub struct RawParameter {
    pub name: String,
    pub kind: Option<ParameterKind>,
    pub annotation: Option<RawAnnotation>,
    pub default: Option<Value>,
}

impl RawParameter {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            annotation: None,
            default: None,
        }
    }

    /// A parameter whose binding kind is unknown.
    #[must_use]
    pub fn unclassified(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            annotation: None,
            default: None,
        }
    }

    #[must_use]
    pub fn annotated(mut self, ty: TypeExpr) -> Self {
        self.annotation = Some(RawAnnotation::Type(ty));
        self
    }

    #[must_use]
    pub fn forward_ref(mut self, name: impl Into<String>) -> Self {
        self.annotation = Some(RawAnnotation::ForwardRef(name.into()));
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// A function, method body, or constructor.
#[derive(Clone)]
pub struct Callable {
    name: String,
    qualname: String,
    doc: Option<String>,
    params: Vec<RawParameter>,
    returns: Option<RawAnnotation>,
    is_async: bool,
    body: Option<NativeFn>,
}

impl Callable {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> CallableBuilder {
        let name = name.into();
        CallableBuilder {
            inner: Self {
                qualname: name.clone(),
                name,
                doc: None,
                params: Vec::new(),
                returns: None,
                is_async: false,
                body: None,
            },
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted path inside its module, e.g. `Outer.method`.
    #[must_use]
    pub fn qualname(&self) -> &str {
        &self.qualname
    }

    /// Raw documentation text, uncleaned.
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    #[must_use]
    pub fn params(&self) -> &[RawParameter] {
        &self.params
    }

    #[must_use]
    pub const fn returns(&self) -> Option<&RawAnnotation> {
        self.returns.as_ref()
    }

    #[must_use]
    pub const fn is_async(&self) -> bool {
        self.is_async
    }

    #[must_use]
    pub const fn body(&self) -> Option<&NativeFn> {
        self.body.as_ref()
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("qualname", &self.qualname)
            .field("params", &self.params.len())
            .field("is_async", &self.is_async)
            .field("has_body", &self.body.is_some())
            .finish_non_exhaustive()
    }
}

/// Incremental construction of a [`Callable`].
pub struct CallableBuilder {
    inner: Callable,
}

impl CallableBuilder {
    #[must_use]
    pub fn qualname(mut self, qualname: impl Into<String>) -> Self {
        self.inner.qualname = qualname.into();
        self
    }

    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.inner.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn param(mut self, param: RawParameter) -> Self {
        self.inner.params.push(param);
        self
    }

    #[must_use]
    pub fn params(mut self, params: impl IntoIterator<Item = RawParameter>) -> Self {
        self.inner.params.extend(params);
        self
    }

    #[must_use]
    pub fn returns(mut self, ty: TypeExpr) -> Self {
        self.inner.returns = Some(RawAnnotation::Type(ty));
        self
    }

    #[must_use]
    pub fn returns_raw(mut self, annotation: RawAnnotation) -> Self {
        self.inner.returns = Some(annotation);
        self
    }

    #[must_use]
    pub const fn is_async(mut self, is_async: bool) -> Self {
        self.inner.is_async = is_async;
        self
    }

    #[must_use]
    pub fn body<F>(mut self, body: F) -> Self
    where
        F: Fn(&BoundArguments) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.inner.body = Some(Arc::new(body));
        self
    }

    #[must_use]
    pub fn build(self) -> Arc<Callable> {
        Arc::new(self.inner)
    }
}
