use crate::article::Article;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Bookmarks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Bookmarks,
    Detail(Box<Article>),
}

impl From<Tab> for Route {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Home => Route::Home,
            Tab::Bookmarks => Route::Bookmarks,
        }
    }
}

/// A tab screen became the visible screen again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusEvent(pub Tab);

/// Two tabs with a detail stack on top of them.
#[derive(Debug, Clone)]
pub struct Navigator {
    tab: Tab,
    details: Vec<Article>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            tab: Tab::Home,
            details: Vec::new(),
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn current(&self) -> Route {
        match self.details.last() {
            Some(article) => Route::Detail(Box::new(article.clone())),
            None => self.tab.into(),
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.details.is_empty()
    }

    /// Tab routes close any open detail screens; a detail route stacks.
    pub fn navigate(&mut self, route: Route) -> Option<FocusEvent> {
        match route {
            Route::Detail(article) => {
                self.details.push(*article);
                None
            }
            Route::Home => self.switch_tab(Tab::Home),
            Route::Bookmarks => self.switch_tab(Tab::Bookmarks),
        }
    }

    pub fn back(&mut self) -> Option<FocusEvent> {
        self.details.pop()?;
        if self.details.is_empty() {
            Some(FocusEvent(self.tab))
        } else {
            None
        }
    }

    fn switch_tab(&mut self, tab: Tab) -> Option<FocusEvent> {
        let was_visible = self.tab == tab && self.details.is_empty();
        self.details.clear();
        self.tab = tab;
        if was_visible {
            None
        } else {
            Some(FocusEvent(tab))
        }
    }
}
