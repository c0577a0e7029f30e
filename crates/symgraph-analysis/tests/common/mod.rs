//! Shared source model fixtures.

#![allow(dead_code)]

use symgraph_analysis::source_model::{InMemoryModel, OccurrenceRole};

/// Layered services:
/// `main → AppController.start → UserController.processRequest →
/// UserService.updateUser → {validateUser, saveUser} → DatabaseService.saveData`.
pub fn service_layer_model() -> InMemoryModel {
    InMemoryModel::builder()
        .file("src/main.ts", |f| {
            f.import("AppController");
            f.function("main", |b| {
                b.call_member("AppController", "start");
            });
        })
        .file("src/app.controller.ts", |f| {
            f.import("UserController");
            f.export().class("AppController", |c| {
                c.method("start", |b| {
                    b.call_member("UserController", "processRequest");
                });
            });
        })
        .file("src/user.controller.ts", |f| {
            f.import("UserService");
            f.export().class("UserController", |c| {
                c.method("processRequest", |b| {
                    b.call_member("UserService", "updateUser");
                });
            });
        })
        .file("src/user.service.ts", |f| {
            f.import("DatabaseService");
            f.export().class("UserService", |c| {
                c.method("updateUser", |b| {
                    b.call_this("validateUser").call_this("saveUser");
                });
                c.private_method("validateUser", |_| {});
                c.method("saveUser", |b| {
                    b.call_member("DatabaseService", "saveData");
                });
                c.private_method("unusedMethod", |_| {});
            });
        })
        .file("src/database.service.ts", |f| {
            f.export().class("DatabaseService", |c| {
                c.method("saveData", |_| {});
            });
        })
        .build()
}

/// A small UI tree: hooks, function components, a class component and an
/// app shell with a default-exported function.
pub fn component_model() -> InMemoryModel {
    InMemoryModel::builder()
        .file("src/hooks/useUsers.ts", |f| {
            f.export().arrow("useUsers", |b| {
                b.call("useState").call_member("api", "fetchUsers");
            });
        })
        .file("src/components/UserCard.tsx", |f| {
            f.export().function("UserCard", |b| {
                b.param("props", None).render("div");
            });
        })
        .file("src/components/UserList.tsx", |f| {
            f.import("UserCard").import("useUsers");
            f.export().function("UserList", |b| {
                b.call("useUsers")
                    .render_with("ul", |b| {
                        b.render("UserCard");
                    })
                    .render("EmptyState");
            });
        })
        .file("src/components/Dashboard.tsx", |f| {
            f.import("UserList");
            f.export().class("Dashboard", |c| {
                c.extends("React.Component");
                c.method("render", |b| {
                    b.render("UserList");
                });
                c.method("componentDidMount", |b| {
                    b.call_this("load");
                });
                c.method("load", |b| {
                    b.call_member("api", "fetchStats");
                });
            });
        })
        .file("src/App.tsx", |f| {
            f.import("Dashboard");
            f.default_export_function(Some("App"), |b| {
                b.render("Dashboard").call_member("React", "useEffect");
            });
        })
        .file("src/types/api.d.ts", |f| {
            f.export().function("fetchUsers", |_| {});
        })
        .build()
}

/// A repository class with one member nothing outside its file calls.
pub fn repository_model() -> InMemoryModel {
    InMemoryModel::builder()
        .file("src/models.ts", |f| {
            f.export().interface("User");
            f.export().class("UserRepository", |c| {
                c.method("findAll", |b| {
                    b.type_ref("User");
                });
                c.private_method("unusedMethod", |_| {});
            });
        })
        .file("src/app.ts", |f| {
            f.import("User").import("UserRepository");
            f.function("main", |b| {
                b.construct("UserRepository")
                    .call_member("repo", "findAll")
                    .occurrence("User", OccurrenceRole::TypeReference);
            });
        })
        .build()
}
