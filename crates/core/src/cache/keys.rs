use uuid::Uuid;

/// Operation name used for single-bin lookups.
pub const GET_OPERATION: &str = "Get";

/// Deployment-scoped prefix for every cache key.
///
/// Environments sharing one cache backend use different namespaces so
/// their keys never collide. Keys have the shape
/// `namespace:arg1:...:argN:operation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheNamespace {
    prefix: String,
}

impl CacheNamespace {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Builds the key for `operation` over `args`.
    ///
    /// The operation name goes last so different operations over the same
    /// arguments never share an entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use hookbins_core::cache::CacheNamespace;
    ///
    /// let ns = CacheNamespace::new("hooks-prod");
    /// assert_eq!(ns.key("Get", &["acct", "42"]), "hooks-prod:acct:42:Get");
    /// assert_eq!(ns.key("Ping", &[]), "hooks-prod:Ping");
    /// ```
    pub fn key(&self, operation: &str, args: &[&str]) -> String {
        let mut key = String::with_capacity(
            self.prefix.len()
                + operation.len()
                + args.iter().map(|a| a.len() + 1).sum::<usize>()
                + 1,
        );
        key.push_str(&self.prefix);
        key.push(':');
        for arg in args {
            key.push_str(arg);
            key.push(':');
        }
        key.push_str(operation);
        key
    }

    /// Returns the cache key for a single bin read.
    pub fn bin_key(&self, account_id: &str, id: Uuid) -> String {
        self.key(GET_OPERATION, &[account_id, &id.to_string()])
    }
}
