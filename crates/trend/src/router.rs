use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Client-side routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    List,
    /// `/stock/:symbol`
    Detail { symbol: String },
    /// `/login`
    Login,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no route matches {0:?}")]
pub struct RouteError(pub String);

impl Route {
    pub fn detail(symbol: &str) -> Self {
        Self::Detail {
            symbol: symbol.to_string(),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

        match trimmed {
            "" => Ok(Self::List),
            "/login" => Ok(Self::Login),
            _ => match trimmed.strip_prefix("/stock/") {
                Some(symbol) if !symbol.is_empty() && !symbol.contains('/') => {
                    Ok(Self::detail(symbol))
                }
                _ => Err(RouteError(path.to_string())),
            },
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "/"),
            Self::Detail { symbol } => write!(f, "/stock/{symbol}"),
            Self::Login => write!(f, "/login"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_routes() {
        assert_eq!("/".parse::<Route>(), Ok(Route::List));
        assert_eq!("".parse::<Route>(), Ok(Route::List));
        assert_eq!("/stock/AAPL".parse::<Route>(), Ok(Route::detail("AAPL")));
        assert_eq!("/stock/AAPL/".parse::<Route>(), Ok(Route::detail("AAPL")));
        assert_eq!("/login".parse::<Route>(), Ok(Route::Login));
    }

    #[test]
    fn rejects_unknown_routes() {
        for path in ["/stock/", "/stock/A/B", "/stocks/1", "/watchlist"] {
            assert_eq!(path.parse::<Route>(), Err(RouteError(path.to_string())));
        }
    }

    #[test]
    fn display_round_trips() {
        for route in [Route::List, Route::detail("MSFT"), Route::Login] {
            assert_eq!(route.to_string().parse::<Route>(), Ok(route));
        }
    }
}
