/// Every page reachable by path. Paths mirror the web front end's URLs so
/// links shared from the site can be opened directly (`athletrack /events`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    Events,
    Upcoming,
    About,
    MatchCards,
    MatchDetails { match_id: String },
    Register,
    RegisterTeam { tournament_id: String },
    AdminLogin,
    Admin,
    SuperAdminLogin,
    SuperAdmin,
}

const SUPER_ADMIN_LOGIN_PATH: &str = "/superadmin8080808080";
const SUPER_ADMIN_PATH: &str = "/superadminakakakakak";

impl Route {
    /// Resolve a path. Unknown paths land on Home, like the site's catch-all.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let path = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        match path {
            "" | "/" => Route::Home,
            "/events" => Route::Events,
            "/upcoming" => Route::Upcoming,
            "/about" => Route::About,
            "/card" => Route::MatchCards,
            "/register" => Route::Register,
            "/adminlogin" => Route::AdminLogin,
            "/admin" => Route::Admin,
            SUPER_ADMIN_LOGIN_PATH => Route::SuperAdminLogin,
            SUPER_ADMIN_PATH => Route::SuperAdmin,
            _ => Self::parse_dynamic(path).unwrap_or_default(),
        }
    }

    fn parse_dynamic(path: &str) -> Option<Self> {
        let (prefix, segment) = path.strip_prefix('/')?.split_once('/')?;
        if segment.is_empty() || segment.contains('/') {
            return None;
        }
        match prefix {
            "MatchDetails" => Some(Route::MatchDetails { match_id: segment.to_string() }),
            "registerteam" => Some(Route::RegisterTeam { tournament_id: segment.to_string() }),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::Events => "/events".into(),
            Route::Upcoming => "/upcoming".into(),
            Route::About => "/about".into(),
            Route::MatchCards => "/card".into(),
            Route::MatchDetails { match_id } => format!("/MatchDetails/{match_id}"),
            Route::Register => "/register".into(),
            Route::RegisterTeam { tournament_id } => format!("/registerteam/{tournament_id}"),
            Route::AdminLogin => "/adminlogin".into(),
            Route::Admin => "/admin".into(),
            Route::SuperAdminLogin => SUPER_ADMIN_LOGIN_PATH.into(),
            Route::SuperAdmin => SUPER_ADMIN_PATH.into(),
        }
    }

    /// Admin pages render without the navigation header and footer.
    pub fn shows_chrome(&self) -> bool {
        !matches!(
            self,
            Route::AdminLogin | Route::Admin | Route::SuperAdminLogin | Route::SuperAdmin
        )
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Events => "Events",
            Route::Upcoming => "Upcoming Events",
            Route::About => "About Us",
            Route::MatchCards => "Matches",
            Route::MatchDetails { .. } => "Match Details",
            Route::Register => "Register",
            Route::RegisterTeam { .. } => "Team Registration",
            Route::AdminLogin => "Admin Login",
            Route::Admin => "Admin Dashboard",
            Route::SuperAdminLogin => "Super Admin Login",
            Route::SuperAdmin => "Super Admin",
        }
    }
}

/// Links shown in the navigation header, in display order.
pub const NAV_LINKS: [(Route, &str); 4] = [
    (Route::Home, "HOME"),
    (Route::Events, "EVENTS"),
    (Route::Upcoming, "UPCOMING"),
    (Route::About, "ABOUT US"),
];
