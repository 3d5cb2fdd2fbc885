use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Check that a derive target is a struct with the given named field.
fn has_named_field(input: &DeriveInput, field: &str) -> bool {
    match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => fields.named.iter().any(|f| {
                f.ident.as_ref().is_some_and(|ident| ident == field)
            }),
            _ => false,
        },
        _ => false,
    }
}

/// Derive macro implementing the leaf-node capability set.
///
/// Implements `HasPosition`, `Parented`, `Documented`, and `NodeLabel`
/// for a node variant struct. The parent back-reference is write-once:
/// assigning a parent twice trips a `debug_assert`, because a node is
/// appended to exactly one container.
///
/// Requires `position: Position`, `parent: Option<NodeId>`, and
/// `doc: Option<Comment>` fields.
///
/// # Example
///
/// ```ignore
/// #[derive(AstLeaf)]
/// struct Syntax {
///     pub value: String,
///     pub doc: Option<Comment>,
///     pub position: Position,
///     pub parent: Option<NodeId>,
/// }
/// ```
#[proc_macro_derive(AstLeaf)]
pub fn derive_ast_leaf(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let generics = input.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    if !has_named_field(&input, "position")
        || !has_named_field(&input, "parent")
        || !has_named_field(&input, "doc")
    {
        return syn::Error::new_spanned(
            &input,
            "AstLeaf requires `position`, `parent`, and `doc: Option<Comment>` fields",
        )
        .to_compile_error()
        .into();
    }

    let label = name.to_string();

    let expanded = quote! {
        impl #impl_generics Documented for #name #ty_generics #where_clause {
            fn doc(&self) -> Option<&Comment> {
                self.doc.as_ref()
            }

            fn set_doc(&mut self, doc: Comment) {
                self.doc = Some(doc);
            }
        }

        impl #impl_generics HasPosition for #name #ty_generics #where_clause {
            fn position(&self) -> &Position {
                &self.position
            }
        }

        impl #impl_generics Parented for #name #ty_generics #where_clause {
            fn parent(&self) -> Option<NodeId> {
                self.parent
            }

            fn set_parent(&mut self, parent: NodeId) {
                debug_assert!(
                    self.parent.is_none(),
                    "parent is assigned exactly once, at append time"
                );
                self.parent = Some(parent);
            }
        }

        impl #impl_generics NodeLabel for #name #ty_generics #where_clause {
            fn node_label(&self) -> &'static str {
                #label
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derive macro implementing the container-node capability set.
///
/// Implements everything `AstLeaf` does plus `ElementContainer`, backed
/// by an `elements: Vec<NodeId>` field holding children in source order.
///
/// # Example
///
/// ```ignore
/// #[derive(AstContainer)]
/// struct EnumDecl {
///     pub name: String,
///     pub elements: Vec<NodeId>,
///     pub position: Position,
///     pub parent: Option<NodeId>,
/// }
/// ```
#[proc_macro_derive(AstContainer)]
pub fn derive_ast_container(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let generics = input.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    if !has_named_field(&input, "position")
        || !has_named_field(&input, "parent")
        || !has_named_field(&input, "doc")
        || !has_named_field(&input, "elements")
    {
        return syn::Error::new_spanned(
            &input,
            "AstContainer requires `position`, `parent`, `doc`, and `elements: Vec<NodeId>` fields",
        )
        .to_compile_error()
        .into();
    }

    let label = name.to_string();

    let expanded = quote! {
        impl #impl_generics Documented for #name #ty_generics #where_clause {
            fn doc(&self) -> Option<&Comment> {
                self.doc.as_ref()
            }

            fn set_doc(&mut self, doc: Comment) {
                self.doc = Some(doc);
            }
        }

        impl #impl_generics HasPosition for #name #ty_generics #where_clause {
            fn position(&self) -> &Position {
                &self.position
            }
        }

        impl #impl_generics Parented for #name #ty_generics #where_clause {
            fn parent(&self) -> Option<NodeId> {
                self.parent
            }

            fn set_parent(&mut self, parent: NodeId) {
                debug_assert!(
                    self.parent.is_none(),
                    "parent is assigned exactly once, at append time"
                );
                self.parent = Some(parent);
            }
        }

        impl #impl_generics NodeLabel for #name #ty_generics #where_clause {
            fn node_label(&self) -> &'static str {
                #label
            }
        }

        impl #impl_generics ElementContainer for #name #ty_generics #where_clause {
            fn elements(&self) -> &[NodeId] {
                &self.elements
            }

            fn elements_mut(&mut self) -> &mut Vec<NodeId> {
                &mut self.elements
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derive an inherent `kind_name()` method for an enum that returns the
/// variant name.
///
/// For unit variants, the match arm uses `Type::Variant`.
/// For tuple variants, it uses `Type::Variant(..)`.
/// For struct variants, it uses `Type::Variant { .. }`.
///
/// # Example
///
/// ```ignore
/// #[derive(NodeKindName)]
/// enum Node { Syntax(Syntax), Comment(Comment) }
/// # impl Node { /* kind_name() generated */ }
/// ```
#[proc_macro_derive(NodeKindName)]
pub fn derive_node_kind_name(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(
            &input,
            "NodeKindName can only be derived for enums",
        )
        .to_compile_error()
        .into();
    };

    let arms = data_enum.variants.iter().map(|v| {
        let v_ident = &v.ident;
        let v_name = v_ident.to_string();
        match &v.fields {
            Fields::Unit => quote! { #name::#v_ident => #v_name },
            Fields::Unnamed(_) => quote! { #name::#v_ident(..) => #v_name },
            Fields::Named(_) => quote! { #name::#v_ident { .. } => #v_name },
        }
    });

    let expanded = quote! {
        impl #name {
            /// Return the enum variant name.
            pub fn kind_name(&self) -> &'static str {
                match self {
                    #( #arms, )*
                }
            }
        }
    };

    TokenStream::from(expanded)
}
