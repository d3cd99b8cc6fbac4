use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub product_name: AttrValue,
}

#[function_component(Footer)]
pub fn footer(p: &Props) -> Html {
    html! {
        <footer class="site-footer">
            <p>{ format!("{} is a demo storefront. Nothing is charged at checkout.", p.product_name) }</p>
        </footer>
    }
}
